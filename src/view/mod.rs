pub mod overlay;

use serde::{Deserialize, Serialize};

use crate::signal::{Collection, Signal};

pub use overlay::{DetailView, OverlayState};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Presentation-owned state that feeds every derivation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub filter_text: String,
    /// 1-based.
    pub current_page: usize,
    pub selected: Option<Signal>,
    pub modal_open: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter_text: String::new(),
            current_page: 1,
            selected: None,
            modal_open: false,
        }
    }
}

impl ViewState {
    /// Replaces the filter. The current page is left alone.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn derive(&self, collection: &Collection) -> DerivedView {
        derive(collection, &self.filter_text, self.current_page)
    }
}

/// Output of one derivation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedView {
    pub rows: Vec<Signal>,
    pub page_count: usize,
    pub filtered_count: usize,
}

pub fn derive(collection: &Collection, filter_text: &str, page: usize) -> DerivedView {
    let filtered = filter_signals(collection.as_slice(), filter_text);
    let page_count = page_count(filtered.len());
    let rows = display_rows(&filtered, page)
        .iter()
        .map(|s| (*s).clone())
        .collect();
    DerivedView {
        rows,
        page_count,
        filtered_count: filtered.len(),
    }
}

pub fn matches_filter(signal: &Signal, filter_text: &str) -> bool {
    if filter_text.is_empty() {
        return true;
    }
    signal.name().is_some_and(|n| n.contains(filter_text))
        || signal.domain().is_some_and(|d| d.contains(filter_text))
}

/// Records whose name or domain contains `filter_text`, in collection order.
pub fn filter_signals<'a>(signals: &'a [Signal], filter_text: &str) -> Vec<&'a Signal> {
    signals
        .iter()
        .filter(|s| matches_filter(s, filter_text))
        .collect()
}

pub fn page_count(filtered_count: usize) -> usize {
    if filtered_count == 0 {
        return 0;
    }
    if filtered_count <= DEFAULT_PAGE_SIZE {
        return 1;
    }
    filtered_count.div_ceil(DEFAULT_PAGE_SIZE)
}

/// Window of `filtered` shown for `page`.
///
/// A page past the end falls back to the first page's records. The upper
/// bound of the window is `page * DEFAULT_PAGE_SIZE - 1` (exclusive), so
/// multi-page views show at most nine rows per page.
pub fn display_rows<'s, 'a>(filtered: &'s [&'a Signal], page: usize) -> &'s [&'a Signal] {
    let len = filtered.len();
    if len <= DEFAULT_PAGE_SIZE {
        return filtered;
    }

    let page = page.max(1);
    let start = (page - 1).saturating_mul(DEFAULT_PAGE_SIZE);
    if start > len {
        return &filtered[..DEFAULT_PAGE_SIZE];
    }
    let end = page
        .saturating_mul(DEFAULT_PAGE_SIZE)
        .saturating_sub(1)
        .min(len);
    &filtered[start..end]
}
