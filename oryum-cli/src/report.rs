//! Status reporting
//!
//! Commands talk to the user only through a [`Reporter`]. Each command
//! reports its final result exactly once, via either [`Reporter::success`]
//! or [`Reporter::failure`].

use std::cell::RefCell;
use std::time::Duration;

use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};

static SUCCESS: Emoji = Emoji("✓ ", "√ ");
static FAILURE: Emoji = Emoji("✗ ", "x ");
static ARROW: Emoji = Emoji("→ ", "> ");

/// Message sink for command progress and results
pub trait Reporter {
    /// Transient progress message, replaced by the next one
    fn progress(&self, message: &str);

    /// Final success message with optional detail lines
    fn success(&self, message: &str, details: &[String]);

    /// Final failure: a short category label and the detail
    fn failure(&self, label: &str, detail: &str);
}

/// Terminal reporter with a spinner and styled output
#[derive(Default)]
pub struct ConsoleReporter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl ConsoleReporter {
    /// Create a reporter writing to the terminal
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn clear(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Reporter for ConsoleReporter {
    fn progress(&self, message: &str) {
        let mut slot = self.spinner.borrow_mut();
        let spinner = slot.get_or_insert_with(|| {
            let spinner = ProgressBar::new_spinner();
            if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                spinner.set_style(template);
            }
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        });
        spinner.set_message(message.to_string());
    }

    fn success(&self, message: &str, details: &[String]) {
        self.clear();
        println!("{}{}", style(SUCCESS).green(), style(message).green().bold());
        for line in details {
            println!("  {}{}", style(ARROW).dim(), line);
        }
    }

    fn failure(&self, label: &str, detail: &str) {
        self.clear();
        eprintln!(
            "{}{} {}",
            style(FAILURE).red(),
            style(format!("{label}:")).red().bold(),
            detail
        );
    }
}

impl Drop for ConsoleReporter {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Event captured by [`MemoryReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// [`Reporter::progress`]
    Progress(String),
    /// [`Reporter::success`]
    Success {
        /// Headline
        message: String,
        /// Detail lines
        details: Vec<String>,
    },
    /// [`Reporter::failure`]
    Failure {
        /// Category label
        label: String,
        /// Error detail
        detail: String,
    },
}

/// Reporter that records events, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: RefCell<Vec<Event>>,
}

impl MemoryReporter {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events in order
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Final success/failure events only
    #[must_use]
    pub fn results(&self) -> Vec<Event> {
        self.events
            .borrow()
            .iter()
            .filter(|e| !matches!(e, Event::Progress(_)))
            .cloned()
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn progress(&self, message: &str) {
        self.events.borrow_mut().push(Event::Progress(message.to_string()));
    }

    fn success(&self, message: &str, details: &[String]) {
        self.events.borrow_mut().push(Event::Success {
            message: message.to_string(),
            details: details.to_vec(),
        });
    }

    fn failure(&self, label: &str, detail: &str) {
        self.events.borrow_mut().push(Event::Failure {
            label: label.to_string(),
            detail: detail.to_string(),
        });
    }
}
