//! Tiles: one grid position each.
//!
//! A [`Tile`] owns its identity, its lazily fetched face asset and its
//! interaction flags, and turns state changes into [`TileView`] commands.
//!
//! ## State
//!
//! - `matched`: set once by [`Tile::lock_as_matched`], never cleared
//! - `interactable`: toggled by the session while the board is priming
//!
//! Both flags use `Cell` so a shared `Rc<Tile>` can be driven from timer
//! and fetch callbacks without borrowing the session.

mod hidden;

pub use hidden::HiddenFace;

use std::cell::{Cell, OnceCell};
use std::rc::Rc;

use log::trace;

use crate::core::SessionConfig;
use crate::runtime::{AssetFetcher, Blob, TileView};

/// Alt text for a face, as shown to assistive tooling and tooltips.
fn face_label(name: &str) -> String {
    format!("icon {name}")
}

/// One grid cell.
pub struct Tile {
    index: usize,
    identity: String,
    face_path: String,
    face: Rc<OnceCell<Blob>>,
    hidden: HiddenFace,
    hidden_label: String,
    view: Rc<dyn TileView>,
    matched: Cell<bool>,
    interactable: Cell<bool>,
}

impl Tile {
    /// Create the tile at `index` showing icon `identity`.
    ///
    /// Tiles start unmatched and interactable.
    pub fn new(
        index: usize,
        identity: impl Into<String>,
        config: &SessionConfig,
        hidden: HiddenFace,
        view: Rc<dyn TileView>,
    ) -> Self {
        let identity = identity.into();
        Self {
            index,
            face_path: config.icon_path(&identity),
            identity,
            face: Rc::new(OnceCell::new()),
            hidden,
            hidden_label: face_label(&config.hidden_icon),
            view,
            matched: Cell::new(false),
            interactable: Cell::new(true),
        }
    }

    /// Position on the board.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Icon name. Exactly one other tile on the board shares it.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched.get()
    }

    #[must_use]
    pub fn is_interactable(&self) -> bool {
        self.interactable.get()
    }

    /// Whether the face asset has arrived.
    #[must_use]
    pub fn has_face(&self) -> bool {
        self.face.get().is_some()
    }

    /// Two tiles form a pair when their icons match.
    #[must_use]
    pub fn same_identity(&self, other: &Tile) -> bool {
        self.identity == other.identity
    }

    /// Fetch the face asset and pass it to `on_ready`.
    ///
    /// A cached face is handed over immediately without a new request.
    pub fn load_face(&self, fetcher: &dyn AssetFetcher, on_ready: impl FnOnce(&Blob) + 'static) {
        if let Some(face) = self.face.get() {
            on_ready(face);
            return;
        }

        let cell = Rc::clone(&self.face);
        fetcher.fetch(
            &self.face_path,
            Box::new(move |blob| {
                let face = cell.get_or_init(|| blob);
                on_ready(face);
            }),
        );
    }

    /// Flip face up. Returns `false` (and does nothing) if the face has not
    /// loaded yet.
    pub fn reveal(&self) -> bool {
        match self.face.get() {
            Some(face) => {
                self.view.finish_animations();
                self.view.show(&face_label(&self.identity), face);
                true
            }
            None => {
                trace!("tile {} revealed before its face loaded", self.index);
                false
            }
        }
    }

    /// Flip face down. Returns `false` (and does nothing) if the placeholder
    /// has not loaded yet.
    pub fn conceal(&self) -> bool {
        match self.hidden.get() {
            Some(face) => {
                self.view.finish_animations();
                self.view.show(&self.hidden_label, &face);
                true
            }
            None => {
                trace!("tile {} concealed before the hidden face loaded", self.index);
                false
            }
        }
    }

    /// Retire the tile as half of a found pair.
    pub fn lock_as_matched(&self) {
        self.matched.set(true);
        self.view.finish_animations();
        self.view.settle();
    }

    /// Signal an invalid click. Changes no state.
    pub fn reject_feedback(&self) {
        self.view.finish_animations();
        self.view.shake();
    }

    pub fn enable_input(&self) {
        self.set_interactable(true);
    }

    pub fn disable_input(&self) {
        self.set_interactable(false);
    }

    /// Jump the view's running animation to its end state.
    pub fn finish_animations(&self) {
        self.view.finish_animations();
    }

    fn set_interactable(&self, interactable: bool) {
        if self.interactable.replace(interactable) != interactable {
            self.view.finish_animations();
            self.view.set_interactive(interactable);
        }
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tile")
            .field("index", &self.index)
            .field("identity", &self.identity)
            .field("matched", &self.matched.get())
            .field("interactable", &self.interactable.get())
            .field("has_face", &self.has_face())
            .finish()
    }
}
