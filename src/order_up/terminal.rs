use std::io::Write;

use crate::{data::catalog::Game, order_up::controller::TrackView};

/// A rendered card: what the page puts in the track for one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    /// Game name.
    pub name: String,
    /// Date label under the card.
    pub date: String,
    /// Background image path.
    pub background: String,
    /// Logo image path.
    pub logo: String,
}

impl Card {
    fn new(decade: &str, game: &Game) -> Self {
        Self {
            name: game.name.clone(),
            date: game.date.clone(),
            background: game.background_path(decade),
            logo: game.logo_path(decade),
        }
    }
}

/// Terminal stand-in for the timeline page. Keeps the card list the page would show and
/// redraws it after each change.
pub struct TerminalView<W: Write> {
    out: W,
    current: Option<Card>,
    track: Vec<Card>,
}

impl<W: Write> TerminalView<W> {
    /// Draw into `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            current: None,
            track: Vec::new(),
        }
    }

    /// The card currently shown.
    pub fn current(&self) -> Option<&Card> {
        self.current.as_ref()
    }

    /// Cards on the track, left to right.
    pub fn track(&self) -> &[Card] {
        &self.track
    }

    fn redraw(&mut self) {
        // Write errors (e.g. a closed pipe) are ignored.
        let _ = self.draw();
    }

    fn draw(&mut self) -> std::io::Result<()> {
        match &self.current {
            Some(card) => writeln!(self.out, "now showing: {} [{}]", card.name, card.logo)?,
            None => writeln!(self.out, "now showing: (done)")?,
        }
        let line = self
            .track
            .iter()
            .map(|c| format!("{} ({})", c.name, c.date))
            .collect::<Vec<_>>()
            .join(" | ");
        writeln!(self.out, "track: {line}")?;
        self.out.flush()
    }
}

impl<W: Write> TrackView for TerminalView<W> {
    fn show_current(&mut self, decade: &str, game: Option<&Game>) {
        self.current = game.map(|g| Card::new(decade, g));
        self.redraw();
    }

    fn insert(&mut self, decade: &str, game: &Game, position: usize) {
        let card = Card::new(decade, game);
        if position >= self.track.len() {
            self.track.push(card);
        } else {
            self.track.insert(position, card);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/order_up/terminal.rs"]
mod tests;
