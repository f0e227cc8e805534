//! Asset fetching.
//!
//! Icons are opaque [`Blob`]s produced by an [`AssetFetcher`]. Fetches are
//! fire-and-forget: the callback may run later, immediately, or never, and
//! the engine never retries.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use rustc_hash::FxHashMap;

use crate::core::SessionConfig;

/// Opaque displayable asset (image bytes, data URL, texture key...).
///
/// Cloning is cheap, all clones share the same bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Blob(Rc<[u8]>);

impl Blob {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }
}

impl From<&str> for Blob {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().into())
    }
}

impl std::fmt::Debug for Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blob({} bytes)", self.0.len())
    }
}

/// Callback receiving a fetched asset.
pub type OnAsset = Box<dyn FnOnce(Blob)>;

/// Source of icon assets.
pub trait AssetFetcher {
    /// Fetch the asset at `path` and hand it to `on_ready`.
    ///
    /// A failed fetch simply never calls `on_ready`.
    fn fetch(&self, path: &str, on_ready: OnAsset);
}

impl<F: AssetFetcher + ?Sized> AssetFetcher for Rc<F> {
    fn fetch(&self, path: &str, on_ready: OnAsset) {
        (**self).fetch(path, on_ready);
    }
}

/// In-memory asset store.
///
/// Delivers synchronously by default. In deferred mode requests queue up
/// until [`StaticAssets::flush`], which models network latency in tests.
/// Unknown paths log a warning and are never delivered.
#[derive(Default)]
pub struct StaticAssets {
    assets: FxHashMap<String, Blob>,
    deferred: Cell<bool>,
    queued: RefCell<Vec<(String, OnAsset)>>,
    requests: RefCell<Vec<String>>,
}

impl StaticAssets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding a placeholder blob for every icon `config` can ask for.
    ///
    /// Each blob's bytes are the icon's name.
    #[must_use]
    pub fn with_placeholders(config: &SessionConfig) -> Self {
        let mut assets = Self::new();
        for name in config.vocabulary.iter().chain([&config.hidden_icon]) {
            assets.insert(config.icon_path(name), Blob::from(name.as_str()));
        }
        assets
    }

    /// Add an asset (builder pattern).
    #[must_use]
    pub fn with_asset(mut self, path: impl Into<String>, blob: Blob) -> Self {
        self.insert(path, blob);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, blob: Blob) {
        self.assets.insert(path.into(), blob);
    }

    /// Switch between synchronous and queued delivery.
    pub fn set_deferred(&self, deferred: bool) {
        self.deferred.set(deferred);
    }

    /// Deliver every queued request. Returns how many callbacks ran.
    pub fn flush(&self) -> usize {
        let queued = std::mem::take(&mut *self.queued.borrow_mut());
        let mut delivered = 0;
        for (path, on_ready) in queued {
            if self.deliver(&path, on_ready) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of requests waiting for [`StaticAssets::flush`].
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queued.borrow().len()
    }

    /// Every path requested so far, in request order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// How many times `path` was requested.
    #[must_use]
    pub fn request_count(&self, path: &str) -> usize {
        self.requests.borrow().iter().filter(|p| *p == path).count()
    }

    fn deliver(&self, path: &str, on_ready: OnAsset) -> bool {
        match self.assets.get(path) {
            Some(blob) => {
                on_ready(blob.clone());
                true
            }
            None => {
                warn!("asset not found: {path}");
                false
            }
        }
    }
}

impl AssetFetcher for StaticAssets {
    fn fetch(&self, path: &str, on_ready: OnAsset) {
        self.requests.borrow_mut().push(path.to_string());
        if self.deferred.get() {
            self.queued.borrow_mut().push((path.to_string(), on_ready));
        } else {
            self.deliver(path, on_ready);
        }
    }
}

impl std::fmt::Debug for StaticAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAssets")
            .field("assets", &self.assets.len())
            .field("deferred", &self.deferred.get())
            .field("queued", &self.queued.borrow().len())
            .finish()
    }
}
