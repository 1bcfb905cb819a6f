//! Project case-study overlay: the selected project plus its modal.

use std::time::Instant;

use crate::core::focus::{FocusId, FocusRing};
use crate::core::input::Key;
use crate::core::modal::{Modal, ModalOptions, ModalOutcome};
use crate::core::scroll_lock::ScrollLock;
use crate::models::Project;

pub const DIALOG_FOCUS: FocusId = FocusId::fixed("case-study");
pub const CLOSE_FOCUS: FocusId = FocusId::fixed("case-study-close");
pub const CONTACT_FOCUS: FocusId = FocusId::fixed("case-study-contact");

/// Focus id of a project card in the projects grid.
pub fn card_focus(project: &Project) -> FocusId {
    FocusId::new(format!("project-card-{}", project.id))
}

#[derive(Debug)]
pub struct CaseStudy {
    modal: Modal,
    selected: Option<Project>,
}

impl CaseStudy {
    pub fn new(lock: ScrollLock, options: ModalOptions) -> Self {
        Self {
            modal: Modal::new(lock, options),
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<&Project> {
        self.selected.as_ref()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Select `project` and show its case study. Replaces whatever was shown.
    pub fn select(
        &mut self,
        project: &Project,
        previously_focused: Option<FocusId>,
        now: Instant,
    ) -> FocusId {
        tracing::debug!(project = %project.id, "case study selected");
        self.selected = Some(project.clone());
        let ring = FocusRing::new(DIALOG_FOCUS, vec![CLOSE_FOCUS, CONTACT_FOCUS]);
        self.modal.open(ring, previously_focused, now)
    }

    pub fn close(&mut self, now: Instant) -> ModalOutcome {
        let outcome = self.modal.close(now);
        self.clear_if_closed(&outcome);
        outcome
    }

    pub fn handle_key(&mut self, key: Key, now: Instant) -> ModalOutcome {
        let outcome = self.modal.handle_key(key, now);
        self.clear_if_closed(&outcome);
        outcome
    }

    pub fn backdrop_click(&mut self, now: Instant) -> ModalOutcome {
        let outcome = self.modal.backdrop_click(now);
        self.clear_if_closed(&outcome);
        outcome
    }

    pub fn focus(&mut self, id: FocusId) {
        self.modal.focus(id);
    }

    pub fn tick(&mut self, now: Instant) {
        self.modal.tick(now);
    }

    fn clear_if_closed(&mut self, outcome: &ModalOutcome) {
        if matches!(outcome, ModalOutcome::Closed { .. }) {
            self.selected = None;
        }
    }
}
