//! Build topology model types.
//!
//! A model snapshot is a tree of capability-tagged nodes: one project root
//! owning an ordered list of modules, each module owning an ordered list of
//! content roots. The data here is the arena payload; consumers navigate it
//! through the handles in [`node`].

pub mod node;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use node::{Buildable, Hierarchical, ModelNode, ModuleNode, ProjectNode};

/// Identifier of a module node, unique within one snapshot.
///
/// Ids carry no meaning across snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub(crate) u32);

impl ModuleId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of a model node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Project,
    Module,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Project => "project",
            NodeKind::Module => "module",
        }
    }
}

/// A build task attached to a buildable element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTask {
    /// Task name (e.g., "assemble", "test")
    pub name: String,
    /// Human-readable description
    pub description: Option<String>,
}

impl BuildTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Attributes of the project root node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProjectData {
    pub name: String,
    pub description: Option<String>,
    /// Absolute path of the project root directory
    pub root_dir: PathBuf,
    /// Ordered child list; wired once at construction, then frozen
    pub modules: Vec<ModuleId>,
}

/// Attributes of one module node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ModuleData {
    pub name: String,
    pub description: Option<String>,
    /// Ordered content roots; the first is conventionally primary
    pub content_roots: Vec<PathBuf>,
    /// Whether the module participates in build execution
    pub buildable: bool,
    pub tasks: Vec<BuildTask>,
}
