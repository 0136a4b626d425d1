//! Authoritative tag selection for the card being created.
//!
//! `Empty --drop(t)--> Selected(t)`, `Selected(a) --drop(b)--> Selected(b)`,
//! `Selected(_) --clear | submit_success--> Empty`. There is no terminal
//! state; the machine cycles for the lifetime of the form.

#[cfg(test)]
#[path = "assignment_test.rs"]
mod assignment_test;

use serde::Serialize;

use crate::doc::Tag;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "tag", rename_all = "snake_case")]
pub enum Assignment {
    #[default]
    Empty,
    Selected(Tag),
}

/// Outcome of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed,
    Unchanged,
}

impl Transition {
    #[must_use]
    pub fn changed(self) -> bool {
        self == Self::Changed
    }
}

impl Assignment {
    #[must_use]
    pub fn selected(&self) -> Option<&Tag> {
        match self {
            Self::Empty => None,
            Self::Selected(tag) => Some(tag),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Commit a dropped tag, replacing any previous one.
    pub fn drop_tag(&mut self, tag: Tag) -> Transition {
        if self.selected() == Some(&tag) {
            return Transition::Unchanged;
        }
        *self = Self::Selected(tag);
        Transition::Changed
    }

    /// Operator pressed the remove control.
    pub fn clear(&mut self) -> Transition {
        self.reset()
    }

    /// Form was submitted successfully.
    pub fn submit_success(&mut self) -> Transition {
        self.reset()
    }

    fn reset(&mut self) -> Transition {
        if self.is_empty() {
            return Transition::Unchanged;
        }
        *self = Self::Empty;
        Transition::Changed
    }
}
