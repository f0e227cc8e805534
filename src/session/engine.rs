//! The game session state machine.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, error, info, trace};

use super::intro::IntroSequencer;
use super::state::{ClickOutcome, Phase, Selection};
use crate::core::{GameRng, SessionConfig, SessionError};
use crate::pairing::generate_pairs;
use crate::runtime::{AssetFetcher, Scheduler, TileView};
use crate::tile::{HiddenFace, Tile};

/// External collaborators a session drives.
pub struct Collaborators {
    /// Fetches icon images.
    pub fetcher: Rc<dyn AssetFetcher>,
    /// Runs delayed tasks on the session's thread.
    pub scheduler: Rc<dyn Scheduler>,
    /// Face-down placeholder cache, shareable between sessions.
    pub hidden: HiddenFace,
}

/// Mutable part of a session. Everything in here is rebuilt by a restart
/// except the RNG stream and the generation counter.
pub(crate) struct SessionState {
    /// Bumped by every restart. Callbacks compare their captured value to
    /// this one and do nothing on mismatch.
    pub(crate) generation: u64,
    pub(crate) input_enabled: bool,
    pub(crate) tiles: Vec<Rc<Tile>>,
    pub(crate) selection: Selection,
    rng: GameRng,
}

pub(crate) struct Shared {
    pub(crate) config: SessionConfig,
    views: Vec<Rc<dyn TileView>>,
    pub(crate) fetcher: Rc<dyn AssetFetcher>,
    pub(crate) scheduler: Rc<dyn Scheduler>,
    hidden: HiddenFace,
    /// A deal is queued behind the placeholder fetch.
    deal_pending: Cell<bool>,
    pub(crate) state: RefCell<SessionState>,
}

impl Shared {
    /// Whether `generation` is still the live one.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.state.borrow().generation == generation
    }

    /// Open the board for play once the intro has finished.
    pub(crate) fn finish_priming(&self, generation: u64) {
        let tiles = {
            let mut state = self.state.borrow_mut();
            if state.generation != generation {
                trace!("stale intro completion for generation {generation}");
                return;
            }
            state.input_enabled = true;
            state.tiles.clone()
        };

        for tile in &tiles {
            tile.enable_input();
        }
        info!("board ready: {} tiles, generation {generation}", tiles.len());
    }
}

/// A memory game session.
///
/// Cloning yields another handle to the same session, so the input layer
/// can hold one per tile.
///
/// ## Lifecycle
///
/// 1. [`GameSession::new`] validates the configuration against the board.
/// 2. [`GameSession::start`] loads the placeholder, then restarts.
/// 3. Each restart deals a fresh board and runs the intro sequence; clicks
///    are ignored until it completes.
#[derive(Clone)]
pub struct GameSession {
    shared: Rc<Shared>,
}

impl GameSession {
    /// Create a session over `views`, one per grid cell in board order.
    ///
    /// Fails if the board is empty or odd, or the vocabulary cannot fill it.
    pub fn new(
        config: SessionConfig,
        views: Vec<Rc<dyn TileView>>,
        collaborators: Collaborators,
    ) -> Result<Self, SessionError> {
        config.validate(views.len())?;

        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        debug!("new session over {} tiles, seed {}", views.len(), rng.seed());

        let Collaborators {
            fetcher,
            scheduler,
            hidden,
        } = collaborators;

        Ok(Self {
            shared: Rc::new(Shared {
                config,
                views,
                fetcher,
                scheduler,
                hidden,
                deal_pending: Cell::new(false),
                state: RefCell::new(SessionState {
                    generation: 0,
                    input_enabled: false,
                    tiles: Vec::new(),
                    selection: Selection::Empty,
                    rng,
                }),
            }),
        })
    }

    /// Load the face-down placeholder, then deal the first board.
    ///
    /// Nothing happens until the placeholder arrives; if it never does the
    /// board is never dealt. Once a board is dealt, or while the first deal
    /// is waiting on the placeholder, further calls do nothing.
    pub fn start(&self) {
        if self.generation() > 0 {
            trace!("start ignored, board already dealt");
            return;
        }
        deal_when_ready(&self.shared);
    }

    /// Throw the current board away and deal a new one.
    ///
    /// Valid in any phase. A pending comparison is cancelled and its
    /// resolver, should it still fire, does nothing. Before the placeholder
    /// has loaded the deal waits for it, sharing any deal already queued.
    pub fn on_restart_requested(&self) {
        deal_when_ready(&self.shared);
    }

    /// Handle a click on the tile at `index`.
    pub fn on_click(&self, index: usize) -> ClickOutcome {
        let shared = &self.shared;
        let (tile, action) = {
            let mut state = shared.state.borrow_mut();
            if !state.input_enabled {
                trace!("click on {index} ignored while priming");
                return ClickOutcome::Ignored;
            }
            let Some(tile) = state.tiles.get(index).cloned() else {
                debug!("click on {index} is off the board");
                return ClickOutcome::Ignored;
            };

            let selection = state.selection;
            let action = match selection {
                _ if tile.is_matched() => ClickAction::Reject,
                Selection::Empty => {
                    state.selection = Selection::One { first: index };
                    ClickAction::First
                }
                Selection::One { first } if first != index => ClickAction::Second {
                    first,
                    matched: state.tiles[first].same_identity(&tile),
                    generation: state.generation,
                },
                _ => ClickAction::Reject,
            };
            (tile, action)
        };

        let outcome = match action {
            ClickAction::Reject => {
                tile.reject_feedback();
                ClickOutcome::Rejected
            }
            ClickAction::First => {
                tile.reveal();
                ClickOutcome::FirstSelected
            }
            ClickAction::Second {
                first,
                matched,
                generation,
            } => {
                let delay = if matched {
                    shared.config.match_dwell()
                } else {
                    shared.config.mismatch_dwell()
                };
                let session = Rc::downgrade(shared);
                let timer = shared.scheduler.after(
                    delay,
                    Box::new(move || resolve(&session, generation, first, index)),
                );

                let armed = {
                    let mut state = shared.state.borrow_mut();
                    let live = state.generation == generation
                        && state.selection == Selection::One { first };
                    if live {
                        state.selection = Selection::Pending {
                            first,
                            second: index,
                            timer,
                        };
                    }
                    live
                };
                if !armed {
                    debug!("selection changed while scheduling, dropping timer {timer}");
                    shared.scheduler.cancel(timer);
                    return ClickOutcome::Ignored;
                }

                tile.reveal();
                ClickOutcome::SecondSelected { matched }
            }
        };

        debug!("click on {index}: {outcome:?}");
        outcome
    }

    /// Debug affordance: flip every tile that is neither matched nor
    /// selected face up.
    pub fn on_peek_start(&self) {
        for tile in self.peekable_tiles() {
            tile.reveal();
            tile.finish_animations();
        }
    }

    /// Flip the tiles shown by [`GameSession::on_peek_start`] back down.
    pub fn on_peek_end(&self) {
        for tile in self.peekable_tiles() {
            tile.conceal();
            tile.finish_animations();
        }
    }

    fn peekable_tiles(&self) -> Vec<Rc<Tile>> {
        let state = self.shared.state.borrow();
        if !state.input_enabled {
            return Vec::new();
        }
        state
            .tiles
            .iter()
            .filter(|tile| !tile.is_matched() && !state.selection.contains(tile.index()))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        let state = self.shared.state.borrow();
        if state.input_enabled {
            state.selection.phase()
        } else {
            Phase::Priming
        }
    }

    /// Whether clicks are being processed.
    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.shared.state.borrow().input_enabled
    }

    /// The two selection slots.
    #[must_use]
    pub fn selection(&self) -> (Option<usize>, Option<usize>) {
        self.shared.state.borrow().selection.slots()
    }

    /// The tile at `index` on the current board.
    #[must_use]
    pub fn tile(&self, index: usize) -> Option<Rc<Tile>> {
        self.shared.state.borrow().tiles.get(index).cloned()
    }

    /// Number of tiles on the current board (zero before the first deal).
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.shared.state.borrow().tiles.len()
    }

    /// How many boards have been dealt.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.shared.state.borrow().generation
    }

    /// Whether every pair on the current board has been found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let state = self.shared.state.borrow();
        !state.tiles.is_empty() && state.tiles.iter().all(|tile| tile.is_matched())
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.shared.config
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("GameSession")
            .field("generation", &state.generation)
            .field("input_enabled", &state.input_enabled)
            .field("selection", &state.selection)
            .field("tiles", &state.tiles.len())
            .finish()
    }
}

/// What a click does, decided under the state borrow and carried out after
/// it is released.
enum ClickAction {
    Reject,
    First,
    Second {
        first: usize,
        matched: bool,
        generation: u64,
    },
}

/// Deal once the placeholder is cached. Requests made while it is still
/// loading collapse into a single deal.
fn deal_when_ready(shared: &Rc<Shared>) {
    if shared.hidden.is_loaded() {
        restart(shared);
        return;
    }
    if shared.deal_pending.replace(true) {
        trace!("deal already waiting on the placeholder");
        return;
    }

    let session = Rc::downgrade(shared);
    let path = shared.config.hidden_path();
    shared
        .hidden
        .load_once(shared.fetcher.as_ref(), &path, move |_| {
            if let Some(shared) = session.upgrade() {
                shared.deal_pending.set(false);
                restart(&shared);
            }
        });
}

fn restart(shared: &Rc<Shared>) {
    let (generation, cancelled, dealt) = {
        let mut state = shared.state.borrow_mut();
        state.input_enabled = false;
        state.generation += 1;
        let cancelled = match std::mem::take(&mut state.selection) {
            Selection::Pending { timer, .. } => Some(timer),
            _ => None,
        };

        let grid_len = shared.views.len();
        let dealt = generate_pairs(&shared.config.vocabulary, grid_len, &mut state.rng)
            .map(|pairing| deal(shared, pairing));
        state.tiles = dealt.as_ref().cloned().unwrap_or_default();
        (state.generation, cancelled, dealt)
    };

    if let Some(timer) = cancelled {
        shared.scheduler.cancel(timer);
    }
    let tiles = match dealt {
        Ok(tiles) => tiles,
        Err(err) => {
            error!("cannot deal board: {err}");
            return;
        }
    };
    for tile in &tiles {
        tile.disable_input();
    }

    info!("dealt board generation {generation}");
    IntroSequencer::new(Rc::downgrade(shared), generation).begin();
}

fn deal(shared: &Shared, pairing: Vec<String>) -> Vec<Rc<Tile>> {
    pairing
        .into_iter()
        .zip(&shared.views)
        .enumerate()
        .map(|(index, (identity, view))| {
            Rc::new(Tile::new(
                index,
                identity,
                &shared.config,
                shared.hidden.clone(),
                Rc::clone(view),
            ))
        })
        .collect()
}

fn resolve(session: &Weak<Shared>, generation: u64, first: usize, second: usize) {
    let Some(shared) = session.upgrade() else {
        return;
    };

    let (a, b) = {
        let mut state = shared.state.borrow_mut();
        if state.generation != generation {
            trace!("stale resolver for generation {generation}");
            return;
        }
        match state.selection {
            Selection::Pending {
                first: f,
                second: s,
                ..
            } if f == first && s == second => {}
            _ => {
                trace!("resolver for ({first}, {second}) no longer pending");
                return;
            }
        }
        state.selection = Selection::Empty;
        (Rc::clone(&state.tiles[first]), Rc::clone(&state.tiles[second]))
    };

    if a.same_identity(&b) {
        a.lock_as_matched();
        b.lock_as_matched();
        debug!("pair {first}/{second} matched ({})", a.identity());
    } else {
        a.conceal();
        b.conceal();
        debug!("pair {first}/{second} hidden again");
    }
}
