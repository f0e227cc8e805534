//! Rendering collaborator.
//!
//! A [`TileView`] is the on-screen representation of one grid cell. The
//! engine issues commands and never waits for an animation to finish.

use std::cell::RefCell;

use super::assets::Blob;

/// Visual commands for one tile.
pub trait TileView {
    /// Flip to `face`. `label` describes it (alt text, tooltip).
    fn show(&self, label: &str, face: &Blob);

    /// Dim the tile into its permanent matched state.
    fn settle(&self);

    /// Play the short "invalid move" cue.
    fn shake(&self);

    /// Render as clickable or as disabled.
    fn set_interactive(&self, interactive: bool);

    /// Jump any running animation to its end state.
    fn finish_animations(&self) {}
}

/// A command received by a [`RecordingView`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    Show { label: String, face: Blob },
    Settle,
    Shake,
    Interactive(bool),
    Finish,
}

/// View that records every command it receives.
///
/// Used to run sessions headless and to observe them in tests.
#[derive(Debug, Default)]
pub struct RecordingView {
    events: RefCell<Vec<ViewEvent>>,
}

impl RecordingView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    /// Forget recorded commands.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Label of the face currently shown, if any face was shown yet.
    #[must_use]
    pub fn current_label(&self) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            ViewEvent::Show { label, .. } => Some(label.clone()),
            _ => None,
        })
    }

    /// Whether the tile is currently rendered as interactive.
    ///
    /// Tiles start out interactive until told otherwise.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.events
            .borrow()
            .iter()
            .rev()
            .find_map(|event| match event {
                ViewEvent::Interactive(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(true)
    }

    /// How many recorded commands satisfy `predicate`.
    pub fn count(&self, predicate: impl Fn(&ViewEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|event| predicate(event)).count()
    }

    fn push(&self, event: ViewEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl TileView for RecordingView {
    fn show(&self, label: &str, face: &Blob) {
        self.push(ViewEvent::Show {
            label: label.to_string(),
            face: face.clone(),
        });
    }

    fn settle(&self) {
        self.push(ViewEvent::Settle);
    }

    fn shake(&self) {
        self.push(ViewEvent::Shake);
    }

    fn set_interactive(&self, interactive: bool) {
        self.push(ViewEvent::Interactive(interactive));
    }

    fn finish_animations(&self) {
        self.push(ViewEvent::Finish);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_view() {
        let view = RecordingView::new();
        assert_eq!(view.current_label(), None);
        assert!(view.is_interactive());

        view.show("icon a", &Blob::from("a"));
        view.set_interactive(false);
        view.show("icon b", &Blob::from("b"));
        view.shake();

        assert_eq!(view.current_label().as_deref(), Some("icon b"));
        assert!(!view.is_interactive());
        assert_eq!(view.count(|e| matches!(e, ViewEvent::Show { .. })), 2);

        view.clear();
        assert!(view.events().is_empty());
    }
}
