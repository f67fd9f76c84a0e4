use colored::{ColoredString, Colorize};

use crate::layout::TableLayout;
use crate::signal::Signal;
use crate::view::{DerivedView, DetailView, ViewState};

pub const HEADING: &str = "Signals";
pub const FILTER_LABEL: &str = "filter by name/domain";
pub const ERROR_TITLE: &str = "Error";
pub const ERROR_MESSAGE: &str = "Error fetching data — try again later";

const MAX_CELL_WIDTH: usize = 32;
const COLUMN_GAP: &str = "  ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Turns view state into terminal text. With `color` off the output has no
/// escape codes at all, which is what exports and tests use.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Full screen: heading, filter, pagination, table and, when open, the overlay.
    pub fn frame(&self, layout: &TableLayout, state: &ViewState, view: &DerivedView) -> String {
        let mut out = String::new();
        out.push_str(&self.paint(HEADING, |s| s.bold()));
        out.push_str("\n\n");
        out.push_str(&self.filter_line(&state.filter_text));
        out.push('\n');
        out.push_str(&self.pagination(view.page_count, state.current_page));
        out.push_str("\n\n");
        out.push_str(&self.table(&layout.columns, &view.rows));
        if let Some(detail) = state.detail(&layout.detail_attributes) {
            out.push('\n');
            out.push_str(&self.detail(&detail));
        }
        out
    }

    pub fn filter_line(&self, filter_text: &str) -> String {
        format!(
            "{}: {}",
            self.paint(FILTER_LABEL, |s| s.dimmed()),
            filter_text
        )
    }

    pub fn pagination(&self, page_count: usize, current: usize) -> String {
        let mut out = String::from("Pages:");
        let items = pagination_items(page_count, current);
        if items.is_empty() {
            out.push_str(" none");
            return out;
        }
        for item in items {
            out.push(' ');
            match item {
                PageItem::Page(n) if n == current => {
                    let label = format!("[{n}]");
                    out.push_str(&self.paint(&label, |s| s.cyan().bold()));
                }
                PageItem::Page(n) => out.push_str(&n.to_string()),
                PageItem::Ellipsis => out.push_str("..."),
            }
        }
        out
    }

    /// Header row, separator, then one line per row prefixed with its 1-based
    /// position (the number `open` takes).
    pub fn table(&self, columns: &[String], rows: &[Signal]) -> String {
        let index_width = rows.len().to_string().len().max(1);
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| truncate(&row.display(c), MAX_CELL_WIDTH))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                cells
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(truncate(c, MAX_CELL_WIDTH).chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let header: Vec<String> = columns
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| pad(&truncate(c, MAX_CELL_WIDTH), *w))
            .collect();
        let header_line = format!(
            "{}{COLUMN_GAP}{}",
            pad("#", index_width),
            header.join(COLUMN_GAP)
        );
        out.push_str(self.paint(header_line.trim_end(), |s| s.bold()).as_str());
        out.push('\n');

        let rule_len = index_width
            + widths.iter().sum::<usize>()
            + COLUMN_GAP.len() * widths.len();
        out.push_str(&"-".repeat(rule_len));
        out.push('\n');

        for (idx, row) in cells.iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .zip(widths.iter())
                .map(|(cell, w)| pad(cell, *w))
                .collect();
            let line = format!(
                "{}{COLUMN_GAP}{}",
                pad(&(idx + 1).to_string(), index_width),
                line.join(COLUMN_GAP)
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    pub fn detail(&self, detail: &DetailView) -> String {
        let mut out = String::new();
        let title = format!("== {} ==", detail.title);
        out.push_str(&self.paint(&title, |s| s.bold()));
        out.push('\n');
        let chip = format!("( {} )", detail.ranking_label);
        out.push_str(&self.paint(&chip, |s| s.cyan()));
        out.push('\n');
        for line in detail.lines.iter() {
            out.push('\n');
            let label = format!("{}:", line.attribute);
            out.push_str(&self.paint(&label, |s| s.bold()));
            out.push(' ');
            out.push_str(&line.value);
        }
        out.push('\n');
        out
    }

    /// The only thing shown after a failed load.
    pub fn error_panel(&self) -> String {
        format!(
            "{}\n{}\n",
            self.paint(ERROR_TITLE, |s| s.red().bold()),
            self.paint(ERROR_MESSAGE, |s| s.red())
        )
    }
}

/// Page buttons for the pagination control: always the first and last page,
/// the current page with one neighbour each side, and ellipses for gaps
/// longer than one page.
pub fn pagination_items(page_count: usize, current: usize) -> Vec<PageItem> {
    if page_count == 0 {
        return Vec::new();
    }
    if page_count <= 7 {
        return (1..=page_count).map(PageItem::Page).collect();
    }

    let mut pages: Vec<usize> = vec![1, page_count];
    let current = current.clamp(1, page_count);
    for p in current.saturating_sub(1)..=current + 1 {
        if (1..=page_count).contains(&p) {
            pages.push(p);
        }
    }
    pages.sort_unstable();
    pages.dedup();

    let mut out = Vec::with_capacity(pages.len() + 2);
    let mut prev: Option<usize> = None;
    for p in pages {
        if let Some(prev) = prev {
            match p - prev {
                1 => {}
                2 => out.push(PageItem::Page(prev + 1)),
                _ => out.push(PageItem::Ellipsis),
            }
        }
        out.push(PageItem::Page(p));
        prev = Some(p);
    }
    out
}

fn truncate(value: &str, max: usize) -> String {
    let single_line = value.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let mut out: String = single_line.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + width - len);
    out.push_str(value);
    out.push_str(&" ".repeat(width - len));
    out
}
