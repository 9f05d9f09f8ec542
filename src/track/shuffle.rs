use rand::Rng;
use rand::seq::SliceRandom as _;
use serde::Serialize;

use crate::foundation::error::{PocketError, PocketResult};

/// Lifecycle of a [`ShuffleState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Items remain to be shown or committed.
    Active,
    /// Every item has been committed; further advances do nothing.
    Exhausted,
}

/// An item committed to the track by [`ShuffleState::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Catalog index of the committed item.
    pub item: usize,
    /// Index at which the item is inserted into the ascending track.
    pub position: usize,
}

/// Outcome of one trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Step {
    /// The previously shown item, now committed to the track.
    pub placed: Option<Placement>,
    /// The newly shown, not yet committed item. `None` once the session is exhausted.
    pub shown: Option<usize>,
}

/// Shuffled reveal order plus a cursor into it.
///
/// The state starts with nothing shown. Each [`advance`](Self::advance) commits the pending item
/// (if any) and shows the next one, so `n` items take `n + 1` advances to exhaust.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShuffleState {
    order: Vec<usize>,
    cursor: usize,
    pending: Option<usize>,
}

impl ShuffleState {
    /// Shuffle `0..item_count` with the thread-local RNG.
    pub fn initialize(item_count: usize) -> Self {
        Self::initialize_with_rng(item_count, &mut rand::thread_rng())
    }

    /// Shuffle `0..item_count` uniformly (Fisher–Yates) with the given RNG.
    pub fn initialize_with_rng<R: Rng + ?Sized>(item_count: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..item_count).collect();
        order.shuffle(rng);
        Self::from_order_unchecked(order)
    }

    /// Replay a known reveal order. `order` must be a permutation of `0..order.len()`.
    pub fn from_order(order: Vec<usize>) -> PocketResult<Self> {
        let mut seen = vec![false; order.len()];
        for &item in &order {
            match seen.get_mut(item) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(PocketError::validation(format!(
                        "reveal order lists item {item} more than once"
                    )));
                }
                None => {
                    return Err(PocketError::validation(format!(
                        "reveal order item {item} is out of range for {} items",
                        order.len()
                    )));
                }
            }
        }
        Ok(Self::from_order_unchecked(order))
    }

    fn from_order_unchecked(order: Vec<usize>) -> Self {
        Self {
            order,
            cursor: 0,
            pending: None,
        }
    }

    /// The reveal order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of items committed to the track so far.
    pub fn committed(&self) -> usize {
        self.cursor
    }

    /// The item currently shown but not yet committed.
    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.cursor >= self.order.len() {
            Phase::Exhausted
        } else {
            Phase::Active
        }
    }

    /// Commit the pending item, then show the next one.
    ///
    /// The insertion position of a committed item is its rank among every item committed so far
    /// (itself included), which keeps the track in ascending catalog order whatever the reveal
    /// order is.
    pub fn advance(&mut self) -> Step {
        let mut step = Step::default();

        if let Some(item) = self.pending.take() {
            let position = self.order[..self.cursor]
                .iter()
                .filter(|&&earlier| earlier < item)
                .count();
            step.placed = Some(Placement { item, position });
            self.cursor += 1;
        }

        self.pending = self.order.get(self.cursor).copied();
        step.shown = self.pending;
        step
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/shuffle.rs"]
mod tests;
