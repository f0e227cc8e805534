//! Collaborator contracts: assets, timers and rendering.
//!
//! The engine touches the outside world only through these traits. Each
//! comes with an in-process implementation so a session can run headless:
//!
//! - [`StaticAssets`]: in-memory [`AssetFetcher`]
//! - [`ManualScheduler`]: virtual-clock [`Scheduler`]
//! - [`RecordingView`]: [`TileView`] that records commands

mod assets;
mod scheduler;
mod view;

pub use assets::{AssetFetcher, Blob, OnAsset, StaticAssets};
pub use scheduler::{ManualScheduler, Scheduler, Task, TimerHandle};
pub use view::{RecordingView, TileView, ViewEvent};
