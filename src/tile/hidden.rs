//! Load-once cache for the face-down placeholder.

use std::cell::{Cell, OnceCell, RefCell};
use std::rc::Rc;

use log::debug;

use crate::runtime::{AssetFetcher, Blob};

type Waiter = Box<dyn FnOnce(&Blob)>;

#[derive(Default)]
struct Inner {
    face: OnceCell<Blob>,
    requested: Cell<bool>,
    waiters: RefCell<Vec<Waiter>>,
}

/// The face-down asset shared by every tile of every board.
///
/// Clones share one cache. The asset is fetched at most once, however many
/// times [`HiddenFace::load_once`] is called.
#[derive(Clone, Default)]
pub struct HiddenFace {
    inner: Rc<Inner>,
}

impl HiddenFace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached asset, if the fetch has completed.
    #[must_use]
    pub fn get(&self) -> Option<Blob> {
        self.inner.face.get().cloned()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.inner.face.get().is_some()
    }

    /// Call `on_ready` with the placeholder, fetching it from `path` first if
    /// no fetch has been started yet.
    ///
    /// Runs `on_ready` immediately when the asset is cached. Otherwise it
    /// waits for the single outstanding fetch.
    pub fn load_once(
        &self,
        fetcher: &dyn AssetFetcher,
        path: &str,
        on_ready: impl FnOnce(&Blob) + 'static,
    ) {
        if let Some(face) = self.inner.face.get() {
            on_ready(face);
            return;
        }

        self.inner.waiters.borrow_mut().push(Box::new(on_ready));
        if self.inner.requested.replace(true) {
            return;
        }

        debug!("fetching hidden face from {path}");
        let inner = Rc::downgrade(&self.inner);
        fetcher.fetch(
            path,
            Box::new(move |blob| {
                let Some(inner) = inner.upgrade() else {
                    return;
                };
                let face = inner.face.get_or_init(|| blob).clone();
                let waiters = std::mem::take(&mut *inner.waiters.borrow_mut());
                for waiter in waiters {
                    waiter(&face);
                }
            }),
        );
    }
}

impl std::fmt::Debug for HiddenFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiddenFace")
            .field("loaded", &self.is_loaded())
            .field("requested", &self.inner.requested.get())
            .finish()
    }
}
