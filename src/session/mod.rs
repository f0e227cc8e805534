//! Game session: selection state machine, comparison timers and the intro
//! sequence.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use memory_match::core::SessionConfig;
//! use memory_match::runtime::{ManualScheduler, RecordingView, StaticAssets, TileView};
//! use memory_match::session::{ClickOutcome, Collaborators, GameSession, Phase};
//! use memory_match::tile::HiddenFace;
//!
//! let config = SessionConfig::default().with_vocabulary(["a", "b"]).with_seed(7);
//! let scheduler = Rc::new(ManualScheduler::new());
//! let views: Vec<Rc<dyn TileView>> =
//!     (0..4).map(|_| Rc::new(RecordingView::new()) as Rc<dyn TileView>).collect();
//!
//! let session = GameSession::new(
//!     config.clone(),
//!     views,
//!     Collaborators {
//!         fetcher: Rc::new(StaticAssets::with_placeholders(&config)),
//!         scheduler: scheduler.clone(),
//!         hidden: HiddenFace::new(),
//!     },
//! )
//! .unwrap();
//!
//! session.start();
//! assert_eq!(session.phase(), Phase::Priming);
//! scheduler.run_until_idle();
//! assert_eq!(session.phase(), Phase::Idle);
//!
//! assert_eq!(session.on_click(0), ClickOutcome::FirstSelected);
//! assert_eq!(session.on_click(0), ClickOutcome::Rejected);
//! ```

mod engine;
mod intro;
mod state;

pub use engine::{Collaborators, GameSession};
pub use state::{ClickOutcome, Phase};
