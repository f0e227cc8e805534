//! Intro sequence: a board-order preview of every icon before play.
//!
//! One step per tile, each scheduled by the one before it:
//!
//! 1. conceal the previous tile
//! 2. fetch this tile's face
//! 3. once it arrives, reveal it and schedule the next step after
//!    `intro_step_ms`
//!
//! The step after the last tile enables input. Every step and every fetch
//! callback checks the session generation, so a chain left behind by a
//! restart stops at its next step.

use std::ops::Range;
use std::rc::{Rc, Weak};

use log::trace;

use super::engine::Shared;

/// Cursor over the board driving one intro chain.
pub(crate) struct IntroSequencer {
    session: Weak<Shared>,
    generation: u64,
    indices: Range<usize>,
    previous: Option<usize>,
}

impl IntroSequencer {
    pub(crate) fn new(session: Weak<Shared>, generation: u64) -> Self {
        let len = session
            .upgrade()
            .map_or(0, |shared| shared.state.borrow().tiles.len());
        Self {
            session,
            generation,
            indices: 0..len,
            previous: None,
        }
    }

    /// Run the first step now.
    pub(crate) fn begin(self) {
        self.step();
    }

    fn step(mut self) {
        let Some(shared) = self.session.upgrade() else {
            return;
        };

        let (previous, next) = {
            let state = shared.state.borrow();
            if state.generation != self.generation {
                trace!("intro chain for generation {} abandoned", self.generation);
                return;
            }
            let previous = self.previous.and_then(|i| state.tiles.get(i).cloned());
            let next = self
                .indices
                .next()
                .and_then(|i| state.tiles.get(i).cloned());
            (previous, next)
        };

        if let Some(tile) = previous {
            tile.conceal();
        }

        let Some(tile) = next else {
            shared.finish_priming(self.generation);
            return;
        };

        self.previous = Some(tile.index());
        let scheduler = Rc::clone(&shared.scheduler);
        let delay = shared.config.intro_step();
        let revealed = Rc::clone(&tile);
        tile.load_face(shared.fetcher.as_ref(), move |_| {
            let live = self
                .session
                .upgrade()
                .is_some_and(|shared| shared.is_current(self.generation));
            if !live {
                trace!("face for tile {} arrived after a restart", revealed.index());
                return;
            }
            revealed.reveal();
            scheduler.after(delay, Box::new(move || self.step()));
        });
    }
}
