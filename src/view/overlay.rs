use serde::Serialize;

use super::ViewState;
use crate::signal::{display_value, Signal, NAME_FIELD};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum OverlayState {
    Closed,
    Open,
}

impl ViewState {
    pub fn overlay(&self) -> OverlayState {
        if self.modal_open {
            OverlayState::Open
        } else {
            OverlayState::Closed
        }
    }

    /// Stores `signal` as the selection and opens the overlay.
    pub fn select_row(&mut self, signal: Signal) {
        self.selected = Some(signal);
        self.modal_open = true;
    }

    /// Closes the overlay. The selection survives, so reopening shows the
    /// last selected record.
    pub fn close(&mut self) {
        self.modal_open = false;
    }

    /// Opens the overlay on the previous selection. Returns false when
    /// nothing was ever selected.
    pub fn reopen(&mut self) -> bool {
        if self.selected.is_none() {
            return false;
        }
        self.modal_open = true;
        true
    }

    /// Detail content for the overlay, or `None` while it is closed.
    pub fn detail(&self, attributes: &[String]) -> Option<DetailView> {
        if !self.modal_open {
            return None;
        }
        let empty = Signal::default();
        let signal = self.selected.as_ref().unwrap_or(&empty);
        Some(DetailView::build(signal, attributes))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub title: String,
    pub ranking_label: String,
    pub lines: Vec<DetailLine>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    pub attribute: String,
    pub value: String,
}

impl DetailView {
    pub fn build(signal: &Signal, attributes: &[String]) -> Self {
        let rank = signal.rank().map(display_value).unwrap_or_default();
        Self {
            title: signal.display(NAME_FIELD),
            ranking_label: ranking_label(&rank),
            lines: attributes
                .iter()
                .map(|attr| DetailLine {
                    attribute: attr.clone(),
                    value: signal.display(attr),
                })
                .collect(),
        }
    }
}

impl std::fmt::Display for DetailLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.attribute, self.value)
    }
}

pub fn ranking_label(rank: &str) -> String {
    format!("Ranking: {rank}")
}
