//! Render loop: owns all subject state and consumes tick and command events.
//!
//! Single logical thread of control. Two event sources re-invoke rendering:
//! the periodic [`Ticker`] redraws every subject with the current instant,
//! and stdin command lines mutate exactly one subject and redraw right away.
//! Both run to completion, so no locking is involved anywhere.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::age;
use crate::config::Config;
use crate::decor::{self, Carousel};
use crate::render::{self, EnLocale, Granularity};
use crate::ticker::Ticker;

/// One tracked reference date and its mutable display mode.
///
/// The reference date stays the verbatim configured string; parsing happens
/// on every computation so a malformed value reads as zero instead of
/// failing at load time.
struct Subject {
    name: String,
    reference: String,
    mode: Granularity,
    carousel: Carousel,
}

enum Command {
    Continue,
    Quit,
}

pub struct App {
    subjects: Vec<Subject>,
    locale: EnLocale,
    backdrop: Option<String>,
    tick_period: Duration,
    drawn_lines: usize,
}

impl App {
    pub fn from_config(config: Config) -> Self {
        let subjects = config
            .subjects
            .into_iter()
            .map(|(name, subject)| Subject {
                name,
                reference: subject.reference_date,
                mode: subject.initial_mode,
                carousel: Carousel::new(subject.decorations),
            })
            .collect();
        Self {
            subjects,
            locale: EnLocale,
            backdrop: None,
            tick_period: Duration::from_secs(config.tick_seconds),
            drawn_lines: 0,
        }
    }

    /// Runs until `quit` or end of stdin. Stops the ticker on the way out.
    pub async fn run(mut self) -> Result<()> {
        decor::preload(
            self.subjects
                .iter()
                .flat_map(|s| s.carousel.paths())
                .map(String::as_str),
        );

        let mut ticker = Ticker::start(self.tick_period);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = io::stdout();

        self.draw(&mut stdout)?;
        loop {
            tokio::select! {
                tick = ticker.tick() => {
                    if tick.is_none() {
                        break;
                    }
                    self.draw(&mut stdout)?;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        // stdin closed
                        info!("input stream closed, shutting down");
                        ticker.stop();
                        break;
                    };
                    if let Command::Quit = self.handle_command(line.trim()) {
                        info!("shutting down");
                        ticker.stop();
                        break;
                    }
                    self.draw(&mut stdout)?;
                }
            }
        }
        Ok(())
    }

    fn handle_command(&mut self, line: &str) -> Command {
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("toggle"), Some(name)) => self.toggle(name),
            (Some("peek"), Some(name)) => self.peek(name),
            (Some("rest"), None) => self.backdrop = None,
            (Some("quit") | Some("q"), None) => return Command::Quit,
            (None, _) => {}
            (Some(other), _) => warn!(command = other, "unrecognized command"),
        }
        Command::Continue
    }

    /// Advances one subject's granularity to its cyclic successor.
    fn toggle(&mut self, name: &str) {
        match self.subjects.iter_mut().find(|s| s.name == name) {
            Some(subject) => {
                subject.mode = subject.mode.advance();
                info!(subject = name, mode = subject.mode.label(), "granularity toggled");
            }
            None => warn!(subject = name, "unknown subject"),
        }
    }

    /// Applies the subject's next decoration as the current backdrop.
    fn peek(&mut self, name: &str) {
        let Some(subject) = self.subjects.iter_mut().find(|s| s.name == name) else {
            warn!(subject = name, "unknown subject");
            return;
        };
        if let Some(path) = subject.carousel.next() {
            self.backdrop = Some(path.to_string());
        }
    }

    /// Builds one display frame: three text slots per subject, a control
    /// line naming the upcoming mode, and the backdrop line when set.
    fn frame(&self, now: DateTime<Utc>) -> String {
        let mut out = String::new();
        if let Some(backdrop) = &self.backdrop {
            out.push_str(&format!("backdrop: {backdrop}\n\n"));
        }
        for subject in &self.subjects {
            let breakdown = age::compute_elapsed(&subject.reference, now);
            let frags = render::render(&breakdown, subject.mode, &self.locale);
            out.push_str(&format!("{}  (since {})\n", subject.name, subject.reference));
            out.push_str(&format!("  years : {}\n", frags.years_text));
            out.push_str(&format!("  months: {}\n", frags.months_text));
            out.push_str(&format!("  days  : {}\n", frags.days_text));
            out.push_str(&format!("  [toggle -> {}]\n", subject.mode.advance().label()));
            out.push('\n');
        }
        out
    }

    /// Redraws in place: moves the cursor back over the previous frame and
    /// clears it before writing the new one.
    fn draw(&mut self, out: &mut impl Write) -> Result<()> {
        let frame = self.frame(Utc::now());
        if self.drawn_lines > 0 {
            write!(out, "\x1b[{}A\x1b[0J", self.drawn_lines)?;
        }
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        self.drawn_lines = frame.lines().count();
        Ok(())
    }
}
