use crate::editor::{eligible_centres, CentreEditor};
use crate::errors::{PortalError, StoreError};
use crate::models::{Centre, Notice, NoticeKind, PortalView, Roster, Teacher};
use crate::stats::build_dashboard;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

pub const NOT_FOUND_MESSAGE: &str = "No teacher found with this HRMS code.";
pub const SAVED_MESSAGE: &str = "Teacher assignment updated successfully!";

/// How long a success notice stays up.
pub fn notice_ttl() -> Duration {
    Duration::seconds(3)
}

#[derive(Debug, Clone)]
struct ActiveNotice {
    notice: Notice,
    expires_at: Option<DateTime<Utc>>,
}

/// An accepted save waiting on the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub hrms_code: String,
    pub centre: String,
}

/// Operator desk state. Every change goes through a named operation.
#[derive(Debug, Default)]
pub struct Portal {
    teachers: Vec<Teacher>,
    centres: Vec<Centre>,
    error: Option<String>,
    notice: Option<ActiveNotice>,
    loading: bool,
    saving: bool,
    editor: Option<CentreEditor>,
}

impl Portal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn selection(&self) -> Option<&CentreEditor> {
        self.editor.as_ref()
    }

    /// A load would overwrite the patch of an outstanding save, so it waits its turn.
    pub fn begin_load(&mut self) -> Result<(), PortalError> {
        if self.saving {
            return Err(PortalError::SaveInFlight);
        }
        self.loading = true;
        Ok(())
    }

    pub fn finish_load(&mut self, result: Result<Roster, StoreError>) {
        match result {
            Ok(roster) => {
                info!(
                    teachers = roster.teachers.len(),
                    centres = roster.centres.len(),
                    "roster loaded"
                );
                self.teachers = roster.teachers;
                self.centres = roster.centres;
                self.error = None;
                self.reselect();
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    fn reselect(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let code = editor.teacher().hrms_code.clone();
        match self.teachers.iter().find(|t| t.hrms_code == code) {
            Some(fresh) => editor.refresh(fresh.clone()),
            None => self.editor = None,
        }
    }

    pub fn search(&mut self, input: &str) -> Option<&Teacher> {
        let code = input.trim();
        let Some(found) = self.teachers.iter().find(|t| t.hrms_code == code).cloned() else {
            self.editor = None;
            self.raise(NoticeKind::Error, NOT_FOUND_MESSAGE, None);
            return None;
        };

        match self.editor.as_mut() {
            Some(editor) if editor.teacher().hrms_code == found.hrms_code => editor.refresh(found),
            Some(editor) => *editor = CentreEditor::new(found),
            None => self.editor = Some(CentreEditor::new(found)),
        }
        self.notice = None;
        self.editor.as_ref().map(CentreEditor::teacher)
    }

    pub fn choose_centre(&mut self, centre: &str) -> Result<(), PortalError> {
        let editor = self.editor.as_mut().ok_or(PortalError::NoSelection)?;
        editor.choose(centre);
        Ok(())
    }

    /// Saves the editor's chosen centre; only valid when the editor allows it.
    pub fn begin_selection_save(&mut self) -> Result<PendingSave, PortalError> {
        if self.saving {
            return Err(PortalError::SaveInFlight);
        }
        let editor = self.editor.as_ref().ok_or(PortalError::NoSelection)?;
        if !editor.can_save() {
            return Err(PortalError::NothingToSave);
        }
        let hrms_code = editor.teacher().hrms_code.clone();
        let centre = editor.chosen().to_string();
        self.begin_save(&hrms_code, &centre)
    }

    /// Teachers on the roster may only move to an eligible centre. Unknown codes
    /// go through so the store can answer for them.
    pub fn begin_save(&mut self, hrms_code: &str, centre: &str) -> Result<PendingSave, PortalError> {
        if self.saving {
            return Err(PortalError::SaveInFlight);
        }
        if self.loading {
            return Err(PortalError::LoadInFlight);
        }
        if let Some(teacher) = self.teachers.iter().find(|t| t.hrms_code == hrms_code) {
            let eligible = eligible_centres(teacher, &self.centres);
            if !eligible.iter().any(|c| c.name == centre) {
                return Err(PortalError::IneligibleCentre);
            }
        }
        self.saving = true;
        if let Some(editor) = self.editor.as_mut().filter(|e| e.teacher().hrms_code == hrms_code) {
            editor.set_saving(true);
        }
        Ok(PendingSave {
            hrms_code: hrms_code.to_string(),
            centre: centre.to_string(),
        })
    }

    pub fn finish_save(
        &mut self,
        pending: PendingSave,
        result: Result<(), StoreError>,
        now: DateTime<Utc>,
    ) {
        self.saving = false;
        if let Some(editor) = self.editor.as_mut() {
            editor.set_saving(false);
        }

        match result {
            Ok(()) => {
                self.apply_assignment(&pending.hrms_code, &pending.centre);
                info!(
                    hrms_code = %pending.hrms_code,
                    centre = %pending.centre,
                    "assignment saved"
                );
                self.raise(NoticeKind::Success, SAVED_MESSAGE, Some(now + notice_ttl()));
            }
            Err(err) => self.raise(NoticeKind::Error, &err.to_string(), None),
        }
    }

    fn apply_assignment(&mut self, hrms_code: &str, centre: &str) {
        if let Some(teacher) = self.teachers.iter_mut().find(|t| t.hrms_code == hrms_code) {
            teacher.examination_centre = centre.to_string();
        }
        if let Some(editor) = self.editor.as_mut().filter(|e| e.teacher().hrms_code == hrms_code) {
            editor.assigned(centre);
        }
    }

    pub fn dismiss(&mut self) {
        self.error = None;
        self.notice = None;
    }

    fn raise(&mut self, kind: NoticeKind, message: &str, expires_at: Option<DateTime<Utc>>) {
        self.notice = Some(ActiveNotice {
            notice: Notice {
                kind,
                message: message.to_string(),
            },
            expires_at,
        });
    }

    pub fn notice_at(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|active| active.expires_at.is_none_or(|at| now < at))
            .map(|active| &active.notice)
    }

    pub fn view_at(&self, now: DateTime<Utc>, open: bool, closes_at: Option<DateTime<Utc>>) -> PortalView {
        let selection = self.editor.as_ref().map(|editor| {
            let mut view = editor.view(&self.centres);
            view.can_save = view.can_save && open && !self.saving;
            view
        });
        let highlight = self
            .editor
            .as_ref()
            .map(|editor| editor.teacher().examination_centre.as_str());

        PortalView {
            open,
            closes_at: closes_at.map(|at| at.to_rfc3339()),
            loading: self.loading,
            error: self.error.clone(),
            notice: self.notice_at(now).cloned(),
            teacher_count: self.teachers.len(),
            selection,
            dashboard: build_dashboard(&self.teachers, &self.centres, highlight),
        }
    }
}
