use std::io::{BufRead, Write};

use tracing::debug;

use crate::layout::TableLayout;
use crate::output::Renderer;
use crate::signal::Collection;
use crate::view::{DerivedView, ViewState};

pub const PROMPT: &str = "> ";

const HELP: &str = "commands:
  filter <text>   filter by name/domain (also: /<text>)
  clear           clear the filter
  page <n>        go to page n
  next, prev      move one page
  open <row>      show details for visible row
  close           close the detail view
  reopen          show the last selected row again
  state           print the view state as JSON
  help            show this list
  quit            leave";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Filter(String),
    Clear,
    Page(usize),
    Next,
    Prev,
    Open(usize),
    Close,
    Reopen,
    State,
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_end_matches(['\n', '\r']);
    if let Some(text) = line.strip_prefix('/') {
        return Ok(Command::Filter(text.to_string()));
    }
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };
    match word.to_ascii_lowercase().as_str() {
        "" => Ok(Command::Empty),
        "filter" | "f" => Ok(Command::Filter(rest.to_string())),
        "clear" => Ok(Command::Clear),
        "page" | "p" => parse_number(rest, "page").map(Command::Page),
        "next" | "n" => Ok(Command::Next),
        "prev" | "previous" => Ok(Command::Prev),
        "open" | "o" => parse_number(rest, "open").map(Command::Open),
        "close" | "c" => Ok(Command::Close),
        "reopen" => Ok(Command::Reopen),
        "state" => Ok(Command::State),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', type 'help'")),
    }
}

fn parse_number(raw: &str, command: &str) -> Result<usize, String> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| format!("usage: {command} <number>"))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    Message(String),
    Quit,
    Nothing,
}

/// Interactive driver: every command mutates the view state, then the frame
/// is derived and rendered again from scratch.
pub struct Session<'a> {
    collection: &'a Collection,
    layout: &'a TableLayout,
    renderer: Renderer,
    state: ViewState,
}

impl<'a> Session<'a> {
    pub fn new(
        collection: &'a Collection,
        layout: &'a TableLayout,
        renderer: Renderer,
        state: ViewState,
    ) -> Self {
        Self {
            collection,
            layout,
            renderer,
            state,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> DerivedView {
        self.state.derive(self.collection)
    }

    pub fn frame(&self) -> String {
        self.renderer.frame(self.layout, &self.state, &self.view())
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        debug!(?command, "session command");
        match command {
            Command::Empty => Outcome::Nothing,
            Command::Quit => Outcome::Quit,
            Command::Help => Outcome::Message(HELP.to_string()),
            Command::State => Outcome::Message(
                serde_json::to_string_pretty(&self.state)
                    .unwrap_or_else(|e| format!("failed to serialize state: {e}")),
            ),
            Command::Filter(text) => {
                self.state.set_filter(text);
                Outcome::Redraw
            }
            Command::Clear => {
                self.state.set_filter(String::new());
                Outcome::Redraw
            }
            Command::Page(page) => {
                let page_count = self.view().page_count;
                if page_count == 0 {
                    return Outcome::Message("no pages to show".to_string());
                }
                if page == 0 || page > page_count {
                    return Outcome::Message(format!(
                        "page {page} is not available (1-{page_count})"
                    ));
                }
                self.state.set_page(page);
                Outcome::Redraw
            }
            Command::Next => {
                let page_count = self.view().page_count;
                let current = self.state.current_page;
                if page_count == 0 {
                    return Outcome::Message("no pages to show".to_string());
                }
                if current > page_count {
                    return Outcome::Message(format!(
                        "page {current} is past the last page ({page_count})"
                    ));
                }
                if current == page_count {
                    return Outcome::Message("already on the last page".to_string());
                }
                self.state.set_page(self.state.current_page + 1);
                Outcome::Redraw
            }
            Command::Prev => {
                if self.state.current_page <= 1 {
                    return Outcome::Message("already on the first page".to_string());
                }
                self.state.set_page(self.state.current_page - 1);
                Outcome::Redraw
            }
            Command::Open(row) => {
                let view = self.view();
                match row.checked_sub(1).and_then(|idx| view.rows.get(idx)) {
                    Some(signal) => {
                        self.state.select_row(signal.clone());
                        Outcome::Redraw
                    }
                    None => Outcome::Message(format!(
                        "row {row} is not visible ({} rows shown)",
                        view.rows.len()
                    )),
                }
            }
            Command::Close => {
                self.state.close();
                Outcome::Redraw
            }
            Command::Reopen => {
                if self.state.reopen() {
                    Outcome::Redraw
                } else {
                    Outcome::Message("nothing selected yet".to_string())
                }
            }
        }
    }

    /// Reads commands line by line until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "{}", self.frame())?;
        write!(writer, "{PROMPT}")?;
        writer.flush()?;

        for line in reader.lines() {
            let line = line?;
            let outcome = match parse_command(&line) {
                Ok(command) => self.apply(command),
                Err(message) => Outcome::Message(message),
            };
            match outcome {
                Outcome::Quit => return Ok(()),
                Outcome::Redraw => writeln!(writer, "{}", self.frame())?,
                Outcome::Message(message) => writeln!(writer, "{message}")?,
                Outcome::Nothing => {}
            }
            write!(writer, "{PROMPT}")?;
            writer.flush()?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;
    use crate::view::OverlayState;
    use serde_json::json;

    fn collection(n: usize) -> Collection {
        (0..n)
            .map(|i| {
                serde_json::from_value::<Signal>(json!({
                    "Company Name": format!("Company {i}"),
                    "Domain": format!("c{i}.example"),
                    "Rank": i + 1
                }))
                .unwrap()
            })
            .collect()
    }

    fn layout() -> TableLayout {
        TableLayout {
            columns: vec!["Rank".to_string(), "Company Name".to_string()],
            detail_attributes: vec!["Domain".to_string()],
        }
    }

    #[test]
    fn parse_command_variants() {
        assert_eq!(parse_command("/acme"), Ok(Command::Filter("acme".to_string())));
        assert_eq!(
            parse_command("filter Big Co"),
            Ok(Command::Filter("Big Co".to_string()))
        );
        assert_eq!(parse_command("filter"), Ok(Command::Filter(String::new())));
        assert_eq!(parse_command("page 3"), Ok(Command::Page(3)));
        assert_eq!(parse_command("  "), Ok(Command::Empty));
        assert!(parse_command("page x").is_err());
        assert!(parse_command("sort").is_err());
    }

    #[test]
    fn page_commands_stay_within_offered_pages() {
        let c = collection(25);
        let l = layout();
        let mut s = Session::new(&c, &l, Renderer::plain(), ViewState::default());
        assert!(matches!(s.apply(Command::Page(4)), Outcome::Message(_)));
        assert_eq!(s.apply(Command::Page(3)), Outcome::Redraw);
        assert!(matches!(s.apply(Command::Next), Outcome::Message(_)));
        assert_eq!(s.apply(Command::Prev), Outcome::Redraw);
        assert_eq!(s.state().current_page, 2);
    }

    #[test]
    fn filter_change_does_not_reset_page() {
        let c = collection(25);
        let l = layout();
        let mut s = Session::new(&c, &l, Renderer::plain(), ViewState::default());
        s.apply(Command::Page(3));
        s.apply(Command::Filter("Company 2".to_string()));
        assert_eq!(s.state().current_page, 3);
        // "Company 2" and "Company 20".."Company 24": six matches on a single page.
        assert_eq!(s.view().rows.len(), 6);
    }

    #[test]
    fn next_past_last_page_names_both_pages() {
        let c = collection(25);
        let l = layout();
        let mut s = Session::new(&c, &l, Renderer::plain(), ViewState::default());
        s.apply(Command::Page(3));
        s.apply(Command::Filter("Company 2".to_string()));
        assert_eq!(
            s.apply(Command::Next),
            Outcome::Message("page 3 is past the last page (1)".to_string())
        );
        assert_eq!(s.state().current_page, 3);

        s.apply(Command::Filter("nothing".to_string()));
        assert_eq!(
            s.apply(Command::Next),
            Outcome::Message("no pages to show".to_string())
        );
    }

    #[test]
    fn open_selects_visible_row() {
        let c = collection(15);
        let l = layout();
        let mut s = Session::new(&c, &l, Renderer::plain(), ViewState::default());
        assert!(matches!(s.apply(Command::Open(10)), Outcome::Message(_)));
        assert_eq!(s.apply(Command::Open(2)), Outcome::Redraw);
        assert_eq!(s.state().overlay(), OverlayState::Open);
        assert!(s.frame().contains("( Ranking: 2 )"));
        s.apply(Command::Close);
        assert!(!s.frame().contains("Ranking:"));
        assert_eq!(s.apply(Command::Reopen), Outcome::Redraw);
        assert!(s.frame().contains("Domain: c1.example"));
    }

    #[test]
    fn run_processes_script_until_quit() {
        let c = collection(3);
        let l = layout();
        let mut s = Session::new(&c, &l, Renderer::plain(), ViewState::default());
        let input = b"/Company 1\nopen 1\nbogus\nquit\nopen 1\n";
        let mut out: Vec<u8> = Vec::new();
        s.run(&input[..], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("filter by name/domain: Company 1"));
        assert!(text.contains("== Company 1 =="));
        assert!(text.contains("unknown command 'bogus'"));
        assert_eq!(s.state().filter_text, "Company 1");
    }

    #[test]
    fn run_stops_at_end_of_input() {
        let c = collection(1);
        let l = layout();
        let mut s = Session::new(&c, &l, Renderer::plain(), ViewState::default());
        let mut out: Vec<u8> = Vec::new();
        s.run(&b"next\n"[..], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("already on the last page"));
    }
}
