use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unspecified => "Unspecified",
        }
    }

    /// Duty slots the centre advertises for this gender, if any.
    pub fn capacity(self, centre: &Centre) -> Option<u32> {
        match self {
            Gender::Male => centre.male,
            Gender::Female => centre.female,
            Gender::Unspecified => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(deserialize_with = "sheet_text")]
    pub hrms_code: String,
    #[serde(default, deserialize_with = "sheet_text")]
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default, deserialize_with = "sheet_text")]
    pub school_name: String,
    #[serde(default, deserialize_with = "sheet_text")]
    pub mobile_number: String,
    #[serde(default, deserialize_with = "sheet_text")]
    pub examination_centre: String,
}

impl Teacher {
    pub fn is_assigned(&self) -> bool {
        !self.examination_centre.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Centre {
    #[serde(deserialize_with = "sheet_text")]
    pub name: String,
    #[serde(default, deserialize_with = "sheet_count", skip_serializing_if = "Option::is_none")]
    pub male: Option<u32>,
    #[serde(default, deserialize_with = "sheet_count", skip_serializing_if = "Option::is_none")]
    pub female: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub centres: Vec<Centre>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Response shape shared by every Store endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest<'a> {
    pub action: &'static str,
    pub hrms_code: &'a str,
    pub centre: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(alias = "hrmsCode")]
    pub hrms_code: String,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceRequest {
    pub centre: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentRequest {
    #[serde(alias = "hrmsCode")]
    pub hrms_code: String,
    pub centre: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CentreOption {
    pub name: String,
    pub slots: Option<u32>,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceCard {
    pub hrms_code: String,
    pub name: String,
    pub gender: &'static str,
    pub school_name: String,
    pub mobile_number: String,
    pub examination_centre: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditorView {
    pub teacher: Teacher,
    pub gender_label: &'static str,
    pub chosen: String,
    pub eligible: Vec<CentreOption>,
    pub can_save: bool,
    pub saving: bool,
    pub card_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentreStat {
    pub centre: String,
    pub male: u64,
    pub female: u64,
    pub total: u64,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortalView {
    pub open: bool,
    pub closes_at: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<Notice>,
    pub teacher_count: usize,
    pub selection: Option<EditorView>,
    pub dashboard: Vec<CentreStat>,
}

/// Spreadsheet cells come back as text or numbers depending on how they were typed.
fn sheet_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Int(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Option::<Cell>::deserialize(deserializer)? {
        Some(Cell::Text(text)) => text,
        Some(Cell::Int(value)) => value.to_string(),
        Some(Cell::Float(value)) => value.to_string(),
        Some(Cell::Flag(value)) => value.to_string(),
        None => String::new(),
    })
}

/// Slot counters; a blank or non-numeric cell means the count is unknown.
fn sheet_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Count(u32),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Cell>::deserialize(deserializer)? {
        Some(Cell::Count(count)) => Some(count),
        // saturates: negatives become 0
        Some(Cell::Float(value)) => Some(value as u32),
        Some(Cell::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}
