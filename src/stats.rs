use crate::models::{Centre, CentreStat, Gender, Teacher};
use std::collections::HashMap;

/// Per-centre head counts by gender, recomputed from the roster.
///
/// Every listed centre yields a row, zero when nobody is assigned. Assignments
/// naming a centre missing from the list are not counted anywhere.
pub fn build_dashboard(
    teachers: &[Teacher],
    centres: &[Centre],
    highlight: Option<&str>,
) -> Vec<CentreStat> {
    let mut rows: Vec<CentreStat> = centres
        .iter()
        .map(|centre| CentreStat {
            centre: centre.name.clone(),
            male: 0,
            female: 0,
            total: 0,
            highlighted: highlight.is_some_and(|name| !name.is_empty() && name == centre.name),
        })
        .collect();

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(centres.len());
    for (position, centre) in centres.iter().enumerate() {
        index.entry(centre.name.as_str()).or_insert(position);
    }

    for teacher in teachers {
        let Some(&position) = index.get(teacher.examination_centre.as_str()) else {
            continue;
        };
        let row = &mut rows[position];
        match teacher.gender {
            Gender::Male => row.male = row.male.saturating_add(1),
            Gender::Female => row.female = row.female.saturating_add(1),
            Gender::Unspecified => continue,
        }
        row.total = row.male + row.female;
    }

    rows
}
