//! Unsaved-change detection and the save-or-discard gate.
//!
//! # Responsibility
//! - Hold the baseline canonical snapshot of the open document.
//! - Decide whether a destructive action may proceed, asking the host to
//!   save, discard or cancel when the document is dirty.
//!
//! # Invariants
//! - Without a baseline nothing is reported dirty.
//! - Dirtiness is byte inequality between the baseline and a fresh canonical
//!   snapshot.
//! - A failed save keeps the previous baseline and never runs the pending
//!   action.

use crate::document::canonical::SnapshotSource;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Action waiting behind the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    NewDocument,
    OpenDocument,
    Quit,
}

impl PendingAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewDocument => "new_document",
            Self::OpenDocument => "open_document",
            Self::Quit => "quit",
        }
    }
}

/// Host answer to the three-way prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Save,
    Discard,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyState {
    NoBaseline,
    Clean,
    Dirty,
}

/// How the gate resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Document was clean; the action ran without a prompt.
    Proceeded,
    SavedAndProceeded,
    DiscardedAndProceeded,
    Cancelled,
}

impl GateOutcome {
    pub fn proceeded(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Gate failure: the host's save error, unchanged.
#[derive(Debug)]
pub enum GateError<E> {
    Save(E),
}

impl<E: Display> Display for GateError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Save(err) => write!(f, "save before proceeding failed: {err}"),
        }
    }
}

impl<E: Error + 'static> Error for GateError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Save(err) => Some(err),
        }
    }
}

/// Decision-UI collaborator for the gate.
pub trait DecisionHost<S: ?Sized> {
    type Error;

    /// Presents the save/discard/cancel prompt for `action`.
    fn decide(&mut self, action: PendingAction) -> Decision;

    /// Persists `document`. Called only after [`Decision::Save`].
    fn save(&mut self, document: &mut S) -> Result<(), Self::Error>;
}

/// Baseline holder; one per open document session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyStateEngine {
    baseline: Option<String>,
}

impl DirtyStateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the baseline unconditionally.
    pub fn set_baseline(&mut self, snapshot: String) {
        self.baseline = Some(snapshot);
    }

    /// Takes a fresh snapshot of `source` as the new baseline.
    pub fn reset_baseline<S: SnapshotSource + ?Sized>(&mut self, source: &mut S) {
        self.baseline = Some(source.canonical_snapshot());
    }

    pub fn baseline(&self) -> Option<&str> {
        self.baseline.as_deref()
    }

    pub fn has_unsaved_changes<S: SnapshotSource + ?Sized>(&self, source: &mut S) -> bool {
        self.state(source) == DirtyState::Dirty
    }

    pub fn state<S: SnapshotSource + ?Sized>(&self, source: &mut S) -> DirtyState {
        match &self.baseline {
            None => DirtyState::NoBaseline,
            Some(baseline) if *baseline == source.canonical_snapshot() => DirtyState::Clean,
            Some(_) => DirtyState::Dirty,
        }
    }

    /// Runs `on_proceed` now when clean, otherwise after the host's decision.
    ///
    /// On `Save` the baseline is reset to the post-save snapshot before
    /// `on_proceed` runs. `Cancel` changes nothing.
    pub fn confirm_proceed_if_dirty<S, H, F>(
        &mut self,
        document: &mut S,
        host: &mut H,
        action: PendingAction,
        on_proceed: F,
    ) -> Result<GateOutcome, GateError<H::Error>>
    where
        S: SnapshotSource + ?Sized,
        H: DecisionHost<S> + ?Sized,
        F: FnOnce(&mut S),
    {
        if !self.has_unsaved_changes(document) {
            on_proceed(document);
            return Ok(GateOutcome::Proceeded);
        }

        let decision = host.decide(action);
        let outcome = match decision {
            Decision::Cancel => {
                info!(
                    "event=dirty_gate module=service status=cancelled action={}",
                    action.as_str()
                );
                return Ok(GateOutcome::Cancelled);
            }
            Decision::Discard => GateOutcome::DiscardedAndProceeded,
            Decision::Save => {
                if let Err(err) = host.save(document) {
                    warn!(
                        "event=dirty_gate module=service status=error action={} error_code=save_failed",
                        action.as_str()
                    );
                    return Err(GateError::Save(err));
                }
                self.reset_baseline(document);
                GateOutcome::SavedAndProceeded
            }
        };

        info!(
            "event=dirty_gate module=service status=ok action={} outcome={:?}",
            action.as_str(),
            outcome
        );
        on_proceed(document);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::{DirtyState, DirtyStateEngine};
    use crate::document::canonical::SnapshotSource;

    struct Fixed(&'static str);

    impl SnapshotSource for Fixed {
        fn canonical_snapshot(&mut self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn state_follows_baseline_comparison() {
        let mut engine = DirtyStateEngine::new();
        let mut doc = Fixed("a");
        assert_eq!(engine.state(&mut doc), DirtyState::NoBaseline);
        assert!(!engine.has_unsaved_changes(&mut doc));
        engine.reset_baseline(&mut doc);
        assert_eq!(engine.state(&mut doc), DirtyState::Clean);
        doc.0 = "b";
        assert_eq!(engine.state(&mut doc), DirtyState::Dirty);
        engine.set_baseline("b".to_string());
        assert_eq!(engine.state(&mut doc), DirtyState::Clean);
    }
}
