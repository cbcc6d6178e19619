use crate::models::{Centre, CentreOption, EditorView, ReferenceCard, Teacher};

/// Centres a teacher may be moved to. The current assignment is always
/// offered so the selector never holds a value outside its options.
pub fn eligible_centres<'a>(teacher: &Teacher, centres: &'a [Centre]) -> Vec<&'a Centre> {
    centres
        .iter()
        .filter(|centre| {
            centre.name == teacher.examination_centre
                || teacher.gender.capacity(centre).is_some_and(|slots| slots > 0)
        })
        .collect()
}

/// Edit state for the selected teacher.
#[derive(Debug, Clone)]
pub struct CentreEditor {
    teacher: Teacher,
    chosen: String,
    saving: bool,
}

impl CentreEditor {
    pub fn new(teacher: Teacher) -> Self {
        let chosen = teacher.examination_centre.clone();
        Self {
            teacher,
            chosen,
            saving: false,
        }
    }

    pub fn teacher(&self) -> &Teacher {
        &self.teacher
    }

    pub fn chosen(&self) -> &str {
        &self.chosen
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn choose(&mut self, centre: &str) {
        self.chosen = centre.trim().to_string();
    }

    pub fn can_save(&self) -> bool {
        !self.saving && !self.chosen.is_empty() && self.chosen != self.teacher.examination_centre
    }

    pub(crate) fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    /// Refresh the underlying record, e.g. after a reload, without losing the choice.
    pub(crate) fn refresh(&mut self, teacher: Teacher) {
        self.teacher = teacher;
    }

    /// Mirror a confirmed assignment into the selection.
    pub(crate) fn assigned(&mut self, centre: &str) {
        self.teacher.examination_centre = centre.to_string();
        self.chosen = centre.to_string();
    }

    pub fn card(&self) -> Option<ReferenceCard> {
        if !self.teacher.is_assigned() {
            return None;
        }
        Some(ReferenceCard {
            hrms_code: self.teacher.hrms_code.clone(),
            name: self.teacher.name.clone(),
            gender: self.teacher.gender.label(),
            school_name: self.teacher.school_name.clone(),
            mobile_number: self.teacher.mobile_number.clone(),
            examination_centre: self.teacher.examination_centre.clone(),
        })
    }

    pub fn view(&self, centres: &[Centre]) -> EditorView {
        let eligible = eligible_centres(&self.teacher, centres)
            .into_iter()
            .map(|centre| CentreOption {
                name: centre.name.clone(),
                slots: self.teacher.gender.capacity(centre),
                current: centre.name == self.teacher.examination_centre,
            })
            .collect();

        EditorView {
            teacher: self.teacher.clone(),
            gender_label: self.teacher.gender.label(),
            chosen: self.chosen.clone(),
            eligible,
            can_save: self.can_save(),
            saving: self.saving,
            card_available: self.teacher.is_assigned(),
        }
    }
}
