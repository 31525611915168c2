//! Interactive browse loop: the single presentation context.
//!
//! Reads commands from stdin and results from the [`Dispatcher`] channel and
//! renders both. State here is only ever touched by the loop itself.

use crate::application::query::{filter_roster, find_entry, step_index};
use crate::domain::model::{RecordDetail, RosterEntry};
use crate::interfaces::session::{Dispatcher, Event};
use crate::presentation::format::{format_detail, format_roster, roster_row, SpriteView};
use crate::presentation::theme::Theme;
use crate::state::AppState;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

pub const HELP: &str = "\
Commands:
  <id|name>   show an entry (e.g. 25, #025, pikachu)
  n, next     next entry in the current list
  p, prev     previous entry in the current list
  /<term>     filter the list by name or number (`/` alone clears)
  l, list     print the current list
  c, cry      play the current entry's cry
  h, help     show this help
  q, quit     leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(String),
    Next,
    Prev,
    Search(String),
    List,
    Cry,
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if let Some(term) = line.strip_prefix('/') {
        return Command::Search(term.trim().to_string());
    }
    match line.to_lowercase().as_str() {
        "" => Command::Empty,
        "n" | "next" => Command::Next,
        "p" | "prev" | "previous" => Command::Prev,
        "l" | "list" => Command::List,
        "c" | "cry" => Command::Cry,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Select(line.to_string()),
    }
}

pub struct Browser {
    dispatcher: Dispatcher,
    theme: Theme,
    enable_emoji: bool,
    roster: Arc<Vec<RosterEntry>>,
    filtered: Vec<usize>,
    selected: Option<usize>,
    current: Option<Arc<RecordDetail>>,
}

impl Browser {
    pub fn new(dispatcher: Dispatcher, theme: Theme, enable_emoji: bool) -> Self {
        Self {
            dispatcher,
            theme,
            enable_emoji,
            roster: Arc::new(Vec::new()),
            filtered: Vec::new(),
            selected: None,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&RecordDetail> {
        self.current.as_deref()
    }

    pub fn selected_entry(&self) -> Option<&RosterEntry> {
        let idx = *self.filtered.get(self.selected?)?;
        self.roster.get(idx)
    }

    pub fn visible(&self) -> Vec<&RosterEntry> {
        self.filtered
            .iter()
            .filter_map(|idx| self.roster.get(*idx))
            .collect()
    }

    fn status(&self, message: &str) -> String {
        format!("{}\n", (self.theme.status)(message))
    }

    fn error(&self, message: &str) -> String {
        format!("{}\n", (self.theme.error)(message))
    }

    /// Select position `pos` of the filtered list and start its lookup.
    fn select(&mut self, pos: usize) -> String {
        self.selected = Some(pos);
        match self.selected_entry() {
            Some(entry) => {
                let message = format!("Scanning {}...", roster_row(entry).replace("  ", " "));
                self.dispatcher.request_detail(entry.id);
                self.status(&message)
            }
            None => String::new(),
        }
    }

    /// Returns `None` when the loop should stop.
    pub fn handle(&mut self, command: Command) -> Option<String> {
        let output = match command {
            Command::Quit => return None,
            Command::Empty => String::new(),
            Command::Help => format!("{}\n", HELP),
            Command::List => {
                let entries = self.visible();
                if entries.is_empty() {
                    self.status("The list is empty.")
                } else {
                    format_roster(&entries, &self.theme)
                }
            }
            Command::Next | Command::Prev => {
                let delta = if command == Command::Next { 1 } else { -1 };
                match step_index(self.selected, delta, self.filtered.len()) {
                    Some(pos) => self.select(pos),
                    None => self.status("Nothing to select."),
                }
            }
            Command::Search(term) => self.apply_filter(&term),
            Command::Select(query) => {
                let hit = find_entry(&self.roster, &query).map(|entry| entry.id);
                match hit {
                    Some(id) => {
                        // Selecting outside the current filter clears it.
                        if !self.filtered.iter().any(|idx| self.roster[*idx].id == id) {
                            self.filtered = (0..self.roster.len()).collect();
                        }
                        match self.filtered.iter().position(|idx| self.roster[*idx].id == id) {
                            Some(pos) => self.select(pos),
                            None => self.error(&format!("No Pokémon matches '{}'.", query)),
                        }
                    }
                    None if self.roster.is_empty() => self.status("Roster is still loading..."),
                    None => self.error(&format!("No Pokémon matches '{}'.", query)),
                }
            }
            Command::Cry => match self.current.clone() {
                None => self.status("Pick a Pokémon first before playing a cry."),
                Some(detail) if detail.cry_url.is_none() => {
                    self.status("No cry is available for this Pokémon.")
                }
                Some(detail) => {
                    self.dispatcher.request_cry(&detail);
                    self.status(&format!("Opening cry for #{:03} {}...", detail.id, detail.name))
                }
            },
        };
        Some(output)
    }

    fn apply_filter(&mut self, term: &str) -> String {
        let visible: Vec<u32> = filter_roster(&self.roster, term)
            .iter()
            .map(|entry| entry.id)
            .collect();
        self.filtered = self
            .roster
            .iter()
            .enumerate()
            .filter(|(_, entry)| visible.contains(&entry.id))
            .map(|(idx, _)| idx)
            .collect();

        if self.filtered.is_empty() {
            self.selected = None;
            self.current = None;
            return self.status("No Pokémon match that scan.");
        }

        let mut output = format_roster(&self.visible(), &self.theme);
        output.push_str(&self.select(0));
        output
    }

    /// Render a background result. Results are applied in arrival order.
    pub fn apply(&mut self, event: Event) -> String {
        match event {
            Event::Roster(Ok(roster)) => {
                self.roster = roster;
                self.filtered = (0..self.roster.len()).collect();
                let mut output =
                    self.status(&format!("Kanto registry online. Loaded {} Pokémon.", self.roster.len()));
                if !self.filtered.is_empty() {
                    output.push_str(&self.select(0));
                }
                output
            }
            Event::Roster(Err(e)) => self.error(&format!("Could not load Pokémon list: {}", e)),
            Event::Detail { result: Ok(loaded), .. } => {
                let sprite = SpriteView::from_bytes(loaded.image.as_ref());
                let mut output =
                    format_detail(&loaded.detail, &sprite, &self.theme, self.enable_emoji);
                output.push_str(&self.status(&format!(
                    "Entry ready for #{:03} {}.",
                    loaded.detail.id, loaded.detail.name
                )));
                self.current = Some(loaded.detail);
                output
            }
            Event::Detail { id, result: Err(e) } => {
                self.current = None;
                self.error(&format!("Could not load details for #{:03}: {}", id, e))
            }
            Event::Cry { result: Ok(path), .. } => {
                let file = path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.status(&format!("Cry opened in your system audio app: {}", file))
            }
            Event::Cry { result: Err(e), .. } => self.error(&e.to_string()),
        }
    }
}

/// Run the interactive loop until `quit`, end of input, or `shutdown`.
pub async fn run(
    state: AppState,
    theme: Theme,
    shutdown: tokio::sync::oneshot::Receiver<()>,
) -> anyhow::Result<()> {
    let enable_emoji = state.config.enable_emoji;
    let (dispatcher, mut events) = Dispatcher::channel(state);
    let mut browser = Browser::new(dispatcher.clone(), theme, enable_emoji);

    println!("{}", (browser.theme.status)("Loading Kanto registry... (h for help)"));
    dispatcher.request_roster();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match browser.handle(parse_command(&line)) {
                    Some(output) => print!("{}", output),
                    None => break,
                }
            }
            Some(event) = events.recv() => {
                print!("{}", browser.apply(event));
            }
            _ = &mut shutdown => break,
        }
    }

    Ok(())
}
