//! Persistence core for the Monogatari writing workbench.
//! Models, block codecs, document assembly and the unsaved-changes gate live
//! here; shells only supply I/O and decisions.

pub mod codec;
pub mod document;
pub mod logging;
pub mod model;
pub mod service;
pub mod settings;
pub mod store;

pub use codec::escape::{escape, unescape};
pub use codec::{
    decode_any, BaseInfoCodec, BlockCodec, ChapterSelectionCodec, CharactersCodec, DecodedBlock,
    OutlineCodec, WorldSettingsCodec,
};
pub use document::assembler::{build_document, load_document, LoadedDocument, EMPTY_PROJECT};
pub use document::canonical::{canonical_snapshot, SnapshotSource};
pub use document::{EditorView, OpenDocument, Project};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::NodeId;
pub use service::dirty_state::{
    Decision, DecisionHost, DirtyState, DirtyStateEngine, GateError, GateOutcome, PendingAction,
};
pub use service::session::{OpenOutcome, Session};
pub use service::template_service::{TemplateError, TemplateLibrary};
pub use settings::{SettingsError, WorkbenchSettings};
pub use store::{FsProjectStore, MemoryProjectStore, ProjectStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
