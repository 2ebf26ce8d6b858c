//! Node handles and capability contracts.
//!
//! Handles are cheap `Copy` views into a frozen [`ModelSnapshot`] arena.
//! Generic consumers program against the [`Buildable`] and [`Hierarchical`]
//! capability traits, or the [`ModelNode`] tagged union, without knowing the
//! concrete node kind.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::snapshot::ModelSnapshot;

use super::{BuildTask, ModuleData, ModuleId, NodeKind, ProjectData};

/// Capability contract: the element participates in build execution.
pub trait Buildable {
    /// Whether the element participates in the build graph
    fn is_buildable(&self) -> bool;

    /// Build tasks attached to the element
    fn tasks(&self) -> &[BuildTask];
}

/// Capability contract: the element supports generic parent/child traversal.
///
/// The lifetime ties returned nodes to the snapshot, not to the handle, so
/// traversal loops can replace their cursor freely.
pub trait Hierarchical<'a> {
    /// The enclosing node, or `None` for the tree root
    fn parent_node(&self) -> Option<ModelNode<'a>>;

    /// Child nodes, in producer order
    fn child_nodes(&self) -> Vec<ModelNode<'a>>;
}

/// Handle to the project root node of a snapshot
#[derive(Clone, Copy)]
pub struct ProjectNode<'a> {
    pub(crate) snapshot: &'a ModelSnapshot,
}

impl<'a> ProjectNode<'a> {
    fn data(&self) -> &'a ProjectData {
        self.snapshot.project_data()
    }

    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    pub fn description(&self) -> Option<&'a str> {
        self.data().description.as_deref()
    }

    /// Absolute root directory of the project
    pub fn root_dir(&self) -> &'a Path {
        &self.data().root_dir
    }

    /// Modules owned by this project, in producer order
    pub fn modules(&self) -> impl Iterator<Item = ModuleNode<'a>> + 'a {
        let snapshot = self.snapshot;
        self.data()
            .modules
            .iter()
            .map(move |id| ModuleNode { snapshot, id: *id })
    }

    pub fn module_count(&self) -> usize {
        self.data().modules.len()
    }
}

impl PartialEq for ProjectNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot.snapshot_id() == other.snapshot.snapshot_id()
    }
}

impl Eq for ProjectNode<'_> {}

impl fmt::Debug for ProjectNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectNode")
            .field("name", &self.name())
            .field("root_dir", &self.root_dir())
            .field("module_count", &self.module_count())
            .finish()
    }
}

impl<'a> Hierarchical<'a> for ProjectNode<'a> {
    fn parent_node(&self) -> Option<ModelNode<'a>> {
        None
    }

    fn child_nodes(&self) -> Vec<ModelNode<'a>> {
        self.modules().map(ModelNode::Module).collect()
    }
}

/// Handle to one module node
#[derive(Clone, Copy)]
pub struct ModuleNode<'a> {
    pub(crate) snapshot: &'a ModelSnapshot,
    pub(crate) id: ModuleId,
}

impl<'a> ModuleNode<'a> {
    fn data(&self) -> &'a ModuleData {
        self.snapshot.module_data(self.id)
    }

    /// Snapshot-scoped identifier of this node
    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    pub fn description(&self) -> Option<&'a str> {
        self.data().description.as_deref()
    }

    /// All content roots. Most modules have a single content root.
    ///
    /// The slice is stable for the lifetime of the snapshot; it may be
    /// empty, never missing.
    pub fn content_roots(&self) -> &'a [PathBuf] {
        &self.data().content_roots
    }

    /// The project that owns this module
    pub fn parent(&self) -> ProjectNode<'a> {
        ProjectNode {
            snapshot: self.snapshot,
        }
    }
}

impl PartialEq for ModuleNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot.snapshot_id() == other.snapshot.snapshot_id() && self.id == other.id
    }
}

impl Eq for ModuleNode<'_> {}

impl fmt::Debug for ModuleNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleNode")
            .field("name", &self.name())
            .field("content_roots", &self.content_roots())
            .finish()
    }
}

impl Buildable for ModuleNode<'_> {
    fn is_buildable(&self) -> bool {
        self.data().buildable
    }

    fn tasks(&self) -> &[BuildTask] {
        &self.data().tasks
    }
}

impl<'a> Hierarchical<'a> for ModuleNode<'a> {
    fn parent_node(&self) -> Option<ModelNode<'a>> {
        Some(ModelNode::Project(self.parent()))
    }

    fn child_nodes(&self) -> Vec<ModelNode<'a>> {
        // Content roots are attributes, not child nodes
        Vec::new()
    }
}

/// A node in the model tree, dispatched by kind.
///
/// New node kinds extend this enum; consumers that only traverse or probe
/// capabilities keep working unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelNode<'a> {
    Project(ProjectNode<'a>),
    Module(ModuleNode<'a>),
}

impl<'a> ModelNode<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            ModelNode::Project(_) => NodeKind::Project,
            ModelNode::Module(_) => NodeKind::Module,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            ModelNode::Project(p) => p.name(),
            ModelNode::Module(m) => m.name(),
        }
    }

    pub fn description(&self) -> Option<&'a str> {
        match self {
            ModelNode::Project(p) => p.description(),
            ModelNode::Module(m) => m.description(),
        }
    }

    /// Probe the build capability of this node
    pub fn as_buildable(&self) -> Option<&dyn Buildable> {
        match self {
            ModelNode::Project(_) => None,
            ModelNode::Module(m) => Some(m),
        }
    }

    /// Walk parent links to the tree root.
    ///
    /// Terminates because the parent relation is acyclic.
    pub fn root(&self) -> ModelNode<'a> {
        let mut current = *self;
        while let Some(parent) = current.parent_node() {
            current = parent;
        }
        current
    }

    /// Number of parent links between this node and the root
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = *self;
        while let Some(parent) = current.parent_node() {
            current = parent;
            depth += 1;
        }
        depth
    }
}

impl<'a> Hierarchical<'a> for ModelNode<'a> {
    fn parent_node(&self) -> Option<ModelNode<'a>> {
        match self {
            ModelNode::Project(p) => p.parent_node(),
            ModelNode::Module(m) => m.parent_node(),
        }
    }

    fn child_nodes(&self) -> Vec<ModelNode<'a>> {
        match self {
            ModelNode::Project(p) => p.child_nodes(),
            ModelNode::Module(m) => m.child_nodes(),
        }
    }
}
