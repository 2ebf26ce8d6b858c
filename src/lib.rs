pub mod error;
pub mod model;
pub mod snapshot;

pub use error::{ModelError, Result};
pub use model::{
    BuildTask, Buildable, Hierarchical, ModelNode, ModuleId, ModuleNode, NodeKind, ProjectNode,
};
pub use snapshot::{ModelSnapshot, ModuleDraft, ProjectDraft, SnapshotBuilder};
