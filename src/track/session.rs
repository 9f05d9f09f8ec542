use rand::Rng;

use crate::{
    data::catalog::{Game, GameCatalog},
    foundation::error::{PocketError, PocketResult},
    track::shuffle::{Phase, Placement, ShuffleState},
};

/// Catalog indexes already revealed, kept in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Track {
    items: Vec<usize>,
}

impl Track {
    /// An empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a committed item at its computed position and return the index actually used.
    ///
    /// Positions past the end append, matching how the page inserted cards.
    pub fn insert(&mut self, placement: Placement) -> usize {
        let at = placement.position.min(self.items.len());
        self.items.insert(at, placement.item);
        at
    }

    /// Committed catalog indexes in display order.
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    /// Number of committed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` before the first commit.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What one trigger changed, resolved against the session's games.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionStep<'a> {
    /// Decade key of the session, for building asset paths.
    pub decade: &'a str,
    /// The game moved onto the track and the index it was inserted at.
    pub placed: Option<(&'a Game, usize)>,
    /// The game now shown as current, or `None` once every game is on the track.
    pub shown: Option<&'a Game>,
}

/// All state of one Order Up session: the decade being played, its games, the reveal order and
/// the track built so far.
#[derive(Clone, Debug)]
pub struct OrderUpSession {
    decade: String,
    games: Vec<Game>,
    shuffle: ShuffleState,
    track: Track,
}

impl OrderUpSession {
    /// Start a session for `decade` with a freshly shuffled order.
    pub fn new(catalog: &GameCatalog, decade: &str) -> PocketResult<Self> {
        Self::with_rng(catalog, decade, &mut rand::thread_rng())
    }

    /// Start a session shuffled with the given RNG.
    pub fn with_rng<R: Rng + ?Sized>(
        catalog: &GameCatalog,
        decade: &str,
        rng: &mut R,
    ) -> PocketResult<Self> {
        let games = catalog.decade(decade)?.to_vec();
        let shuffle = ShuffleState::initialize_with_rng(games.len(), rng);
        Ok(Self::from_parts(decade, games, shuffle))
    }

    /// Start a session that reveals `games` in a known order.
    pub fn with_order(decade: &str, games: Vec<Game>, order: Vec<usize>) -> PocketResult<Self> {
        let shuffle = ShuffleState::from_order(order)?;
        if shuffle.order().len() != games.len() {
            return Err(PocketError::validation(format!(
                "reveal order has {} items but decade '{decade}' has {} games",
                shuffle.order().len(),
                games.len()
            )));
        }
        Ok(Self::from_parts(decade, games, shuffle))
    }

    fn from_parts(decade: &str, games: Vec<Game>, shuffle: ShuffleState) -> Self {
        Self {
            decade: decade.to_string(),
            games,
            shuffle,
            track: Track::new(),
        }
    }

    /// Handle one trigger: commit the current game to the track, then show the next one.
    pub fn advance(&mut self) -> SessionStep<'_> {
        let step = self.shuffle.advance();
        let placed = step.placed.map(|p| {
            let at = self.track.insert(p);
            (&self.games[p.item], at)
        });
        SessionStep {
            decade: &self.decade,
            placed,
            shown: step.shown.map(|i| &self.games[i]),
        }
    }

    /// Decade key being played.
    pub fn decade(&self) -> &str {
        &self.decade
    }

    /// Games of the decade in catalog order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Game currently shown, if any.
    pub fn current(&self) -> Option<&Game> {
        self.shuffle.pending().map(|i| &self.games[i])
    }

    /// Games on the track in display order.
    pub fn track_games(&self) -> impl Iterator<Item = &Game> {
        self.track.items().iter().map(|&i| &self.games[i])
    }

    /// The track of committed catalog indexes.
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Lifecycle phase of the underlying shuffle.
    pub fn phase(&self) -> Phase {
        self.shuffle.phase()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/session.rs"]
mod tests;
