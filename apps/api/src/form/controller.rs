//! Questionnaire state machine.
//!
//! Mirrors the radio-group form: one optional selection per question,
//! submission enabled only when every group has exactly one choice, and a
//! three-panel display cycle (questionnaire → loading → result) that reverts
//! to the questionnaire when generation fails.

use thiserror::Error;

use crate::models::program::{GenerateForm, GeneratedDocument};

/// The five questionnaire groups, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    Niveau,
    Attention,
    Matiere,
    Passion,
    Duree,
}

impl Question {
    pub const ALL: [Question; 5] = [
        Question::Niveau,
        Question::Attention,
        Question::Matiere,
        Question::Passion,
        Question::Duree,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Question::Niveau => "niveau",
            Question::Attention => "attention",
            Question::Matiere => "matiere",
            Question::Passion => "passion",
            Question::Duree => "duree",
        }
    }
}

/// Checked/unchecked state of the five radio groups.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    niveau: Option<String>,
    attention: Option<String>,
    matiere: Option<String>,
    passion: Option<String>,
    duree: Option<String>,
}

impl FormState {
    /// Checks one option in a group, replacing any previous choice.
    pub fn select(&mut self, question: Question, value: impl Into<String>) {
        *self.slot_mut(question) = Some(value.into());
    }

    pub fn selected(&self, question: Question) -> Option<&str> {
        match question {
            Question::Niveau => self.niveau.as_deref(),
            Question::Attention => self.attention.as_deref(),
            Question::Matiere => self.matiere.as_deref(),
            Question::Passion => self.passion.as_deref(),
            Question::Duree => self.duree.as_deref(),
        }
    }

    /// True once every group has a selection.
    pub fn submit_enabled(&self) -> bool {
        Question::ALL.iter().all(|q| self.selected(*q).is_some())
    }

    pub fn unanswered(&self) -> Vec<Question> {
        Question::ALL
            .iter()
            .copied()
            .filter(|q| self.selected(*q).is_none())
            .collect()
    }

    /// Snapshot of the selections as a wire form.
    pub fn to_form(&self) -> GenerateForm {
        GenerateForm {
            niveau: self.niveau.clone(),
            attention: self.attention.clone(),
            matiere: self.matiere.clone(),
            passion: self.passion.clone(),
            duree: self.duree.clone(),
        }
    }

    fn slot_mut(&mut self, question: Question) -> &mut Option<String> {
        match question {
            Question::Niveau => &mut self.niveau,
            Question::Attention => &mut self.attention,
            Question::Matiere => &mut self.matiere,
            Question::Passion => &mut self.passion,
            Question::Duree => &mut self.duree,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("⚠️ Veuillez répondre à toutes les questions")]
    Incomplete { unanswered: Vec<Question> },
}

/// The visible panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Questionnaire,
    Loading,
    Result,
}

/// Drives the submit cycle: questionnaire → loading → result, reverting to
/// the questionnaire on failure. The generated document is held only while
/// the result panel is visible.
#[derive(Debug, Default)]
pub struct FormController {
    pub state: FormState,
    panel: Panel,
    document: Option<GeneratedDocument>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn document(&self) -> Option<&GeneratedDocument> {
        self.document.as_ref()
    }

    /// Validates completeness and switches to the loading panel.
    /// Returns the wire form to submit.
    pub fn begin_submit(&mut self) -> Result<GenerateForm, FormError> {
        if !self.state.submit_enabled() {
            return Err(FormError::Incomplete {
                unanswered: self.state.unanswered(),
            });
        }
        self.panel = Panel::Loading;
        Ok(self.state.to_form())
    }

    /// Stores the generated document and shows the result panel.
    pub fn on_success(&mut self, content: impl Into<String>) {
        self.document = Some(GeneratedDocument::new(content));
        self.panel = Panel::Result;
    }

    /// Reverts to the questionnaire. The caller logs the specific error and
    /// shows the generic alert; nothing is stored.
    pub fn on_failure(&mut self) {
        self.panel = Panel::Questionnaire;
    }
}
