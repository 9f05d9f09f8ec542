use crate::{
    data::catalog::Game,
    track::session::{OrderUpSession, SessionStep},
    track::shuffle::Phase,
};

/// Event name the stream overlay fires to advance the timeline.
pub const DEFAULT_NEXT_EVENT: &str = "orderUpNextGame";

/// An external input that may advance the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// The space key.
    Space,
    /// A named event fired by the host (e.g. a browser-source event).
    Event(String),
    /// Any other key; ignored.
    Key(String),
}

impl Trigger {
    /// Interpret one line of terminal input: a blank line or a lone space is the space key,
    /// `!name` is the named event `name`, anything else is a key press.
    pub fn from_line(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Self::Space;
        }
        match line.strip_prefix('!') {
            Some(name) => Self::Event(name.trim().to_string()),
            None => Self::Key(line.trim().to_string()),
        }
    }
}

/// Rendering side of the timeline page.
pub trait TrackView {
    /// Show `game` as the current card, or hide the current card when `None`.
    fn show_current(&mut self, decade: &str, game: Option<&Game>);
    /// Insert `game` into the track at `position`.
    fn insert(&mut self, decade: &str, game: &Game, position: usize);
}

/// Owns one session and its view, and maps triggers onto `advance` calls.
pub struct PageController<V: TrackView> {
    session: OrderUpSession,
    view: V,
    next_event: String,
}

impl<V: TrackView> PageController<V> {
    /// Wrap a session and show its first game.
    pub fn start(session: OrderUpSession, view: V, next_event: impl Into<String>) -> Self {
        let mut controller = Self {
            session,
            view,
            next_event: next_event.into(),
        };
        controller.step();
        controller
    }

    /// Handle one trigger. Returns `true` if it advanced the session.
    pub fn handle(&mut self, trigger: &Trigger) -> bool {
        let advances = match trigger {
            Trigger::Space => true,
            Trigger::Event(name) => *name == self.next_event,
            Trigger::Key(_) => false,
        };
        if advances {
            self.step();
        } else {
            tracing::debug!(?trigger, "ignoring trigger");
        }
        advances
    }

    fn step(&mut self) {
        let SessionStep {
            decade,
            placed,
            shown,
        } = self.session.advance();
        if let Some((game, position)) = placed {
            tracing::info!(game = %game.name, position, "game placed on track");
            self.view.insert(decade, game, position);
        }
        if let Some(game) = shown {
            tracing::info!(game = %game.name, "showing game");
        }
        self.view.show_current(decade, shown);
    }

    /// `true` once every game is on the track.
    pub fn is_finished(&self) -> bool {
        self.session.phase() == Phase::Exhausted
    }

    /// The session being driven.
    pub fn session(&self) -> &OrderUpSession {
        &self.session
    }

    /// The view being driven.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Give back the view.
    pub fn into_view(self) -> V {
        self.view
    }
}

#[cfg(test)]
#[path = "../../tests/unit/order_up/controller.rs"]
mod tests;
