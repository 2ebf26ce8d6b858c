//! Immutable model snapshots.
//!
//! A snapshot is the unit of model exchange: the producer builds it once
//! through [`builder::SnapshotBuilder`], freezes it, and hands it to
//! consumers as a read-only value. Nothing in a published snapshot ever
//! mutates, so concurrent reads need no synchronization.

pub mod builder;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::model::node::{ModelNode, ModuleNode, ProjectNode};
use crate::model::{ModuleData, ModuleId, ProjectData};

pub use builder::{ModuleDraft, ProjectDraft, SnapshotBuilder};

/// A frozen tree of model nodes rooted at a single project.
///
/// Serialization is the transport boundary: paths travel as platform-native
/// strings and parent references as structural links. A deserialized
/// snapshot must pass [`ModelSnapshot::verify`] before it is handed to
/// consumers; handles over an unverified snapshot may panic on corrupt
/// wiring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// Opaque snapshot identity; fresh per build, preserved across transport
    snapshot_id: String,
    project: ProjectData,
    modules: Vec<ModuleData>,
}

impl ModelSnapshot {
    pub(crate) fn new(project: ProjectData, modules: Vec<ModuleData>) -> Self {
        Self {
            snapshot_id: uuid::Uuid::new_v4().to_string(),
            project,
            modules,
        }
    }

    pub fn snapshot_id(&self) -> &str {
        &self.snapshot_id
    }

    pub(crate) fn project_data(&self) -> &ProjectData {
        &self.project
    }

    pub(crate) fn module_data(&self, id: ModuleId) -> &ModuleData {
        &self.modules[id.index()]
    }

    /// The project root node
    pub fn project(&self) -> ProjectNode<'_> {
        ProjectNode { snapshot: self }
    }

    /// Module handles, in producer order
    pub fn modules(&self) -> impl Iterator<Item = ModuleNode<'_>> {
        self.project().modules()
    }

    /// Look up a module by name
    pub fn module(&self, name: &str) -> Option<ModuleNode<'_>> {
        self.modules().find(|m| m.name() == name)
    }

    /// All module names, in producer order
    pub fn module_names(&self) -> Vec<&str> {
        self.modules().map(|m| m.name()).collect()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Find the module whose content root contains the given path.
    ///
    /// The deepest matching root wins when roots nest.
    pub fn module_for_path(&self, path: &Path) -> Option<ModuleNode<'_>> {
        let mut best: Option<(usize, ModuleNode<'_>)> = None;

        for module in self.modules() {
            for root in module.content_roots() {
                if path.starts_with(root) {
                    let depth = root.components().count();
                    if best.as_ref().map_or(true, |(d, _)| depth > *d) {
                        best = Some((depth, module));
                    }
                }
            }
        }

        best.map(|(_, m)| m)
    }

    /// Generic traversal over every node: the root first, then modules in
    /// producer order
    pub fn nodes(&self) -> impl Iterator<Item = ModelNode<'_>> {
        std::iter::once(ModelNode::Project(self.project()))
            .chain(self.modules().map(ModelNode::Module))
    }

    /// Defensive invariant check.
    ///
    /// Unreachable for builder-produced snapshots; meaningful after
    /// deserialization, before the snapshot is published to consumers.
    pub fn verify(&self) -> Result<()> {
        if let Err(e) = self.check_invariants() {
            tracing::warn!("snapshot {} failed verification: {}", self.snapshot_id, e);
            return Err(e);
        }
        Ok(())
    }

    fn check_invariants(&self) -> Result<()> {
        if self.project.name.is_empty() {
            return Err(ModelError::EmptyProjectName);
        }
        if !self.project.root_dir.is_absolute() {
            return Err(ModelError::RelativeProjectRoot(
                self.project.root_dir.display().to_string(),
            ));
        }

        let mut wired: HashSet<ModuleId> = HashSet::new();
        for id in &self.project.modules {
            if id.index() >= self.modules.len() {
                return Err(ModelError::DanglingChildRef(id.0));
            }
            if !wired.insert(*id) {
                return Err(ModelError::DuplicateChildRef(id.0));
            }
        }

        let mut names: HashSet<&str> = HashSet::new();
        for (index, module) in self.modules.iter().enumerate() {
            if module.name.is_empty() {
                return Err(ModelError::EmptyModuleName);
            }
            if !names.insert(module.name.as_str()) {
                return Err(ModelError::DuplicateModule(module.name.clone()));
            }
            for root in &module.content_roots {
                if !root.is_absolute() {
                    return Err(ModelError::RelativeContentRoot {
                        module: module.name.clone(),
                        path: root.display().to_string(),
                    });
                }
            }
            if !wired.contains(&ModuleId(index as u32)) {
                return Err(ModelError::UnrootedModule(module.name.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_snapshot() -> ModelSnapshot {
        SnapshotBuilder::new()
            .project(ProjectDraft::new("demo", "/repo"))
            .module(ModuleDraft::new("app").with_content_root("/repo/app"))
            .module(
                ModuleDraft::new("lib-core")
                    .with_content_root("/repo/lib/core")
                    .with_content_root("/repo/lib/core-gen"),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_module_lookup_by_name() {
        let snapshot = sample_snapshot();

        assert!(snapshot.module("app").is_some());
        assert!(snapshot.module("lib-core").is_some());
        assert!(snapshot.module("missing").is_none());
    }

    #[test]
    fn test_module_names_in_order() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.module_names(), vec!["app", "lib-core"]);
    }

    #[test]
    fn test_module_for_path() {
        let snapshot = sample_snapshot();

        let hit = snapshot.module_for_path(Path::new("/repo/app/src/main.rs"));
        assert_eq!(hit.unwrap().name(), "app");

        assert!(snapshot.module_for_path(Path::new("/elsewhere/file.rs")).is_none());
    }

    #[test]
    fn test_module_for_path_prefers_deepest_root() {
        let snapshot = SnapshotBuilder::new()
            .project(ProjectDraft::new("nested", "/repo"))
            .module(ModuleDraft::new("outer").with_content_root("/repo/src"))
            .module(ModuleDraft::new("inner").with_content_root("/repo/src/generated"))
            .build()
            .unwrap();

        let hit = snapshot.module_for_path(Path::new("/repo/src/generated/out.rs"));
        assert_eq!(hit.unwrap().name(), "inner");

        let hit = snapshot.module_for_path(Path::new("/repo/src/lib.rs"));
        assert_eq!(hit.unwrap().name(), "outer");
    }

    #[test]
    fn test_nodes_yields_root_first() {
        let snapshot = sample_snapshot();
        let names: Vec<&str> = snapshot.nodes().map(|n| n.name()).collect();
        assert_eq!(names, vec!["demo", "app", "lib-core"]);
    }

    #[test]
    fn test_verify_accepts_builder_output() {
        assert_eq!(sample_snapshot().verify(), Ok(()));
    }

    #[test]
    fn test_verify_rejects_dangling_child_ref() {
        let snapshot = ModelSnapshot {
            snapshot_id: "test".to_string(),
            project: ProjectData {
                name: "broken".to_string(),
                description: None,
                root_dir: PathBuf::from("/repo"),
                modules: vec![ModuleId(7)],
            },
            modules: Vec::new(),
        };

        assert_eq!(snapshot.verify(), Err(ModelError::DanglingChildRef(7)));
    }

    #[test]
    fn test_verify_rejects_unrooted_module() {
        let snapshot = ModelSnapshot {
            snapshot_id: "test".to_string(),
            project: ProjectData {
                name: "broken".to_string(),
                description: None,
                root_dir: PathBuf::from("/repo"),
                modules: Vec::new(),
            },
            modules: vec![ModuleData {
                name: "orphan".to_string(),
                description: None,
                content_roots: Vec::new(),
                buildable: true,
                tasks: Vec::new(),
            }],
        };

        assert_eq!(
            snapshot.verify(),
            Err(ModelError::UnrootedModule("orphan".to_string()))
        );
    }

    #[test]
    fn test_verify_rejects_duplicate_child_ref() {
        let snapshot = ModelSnapshot {
            snapshot_id: "test".to_string(),
            project: ProjectData {
                name: "broken".to_string(),
                description: None,
                root_dir: PathBuf::from("/repo"),
                modules: vec![ModuleId(0), ModuleId(0)],
            },
            modules: vec![ModuleData {
                name: "twice".to_string(),
                description: None,
                content_roots: Vec::new(),
                buildable: true,
                tasks: Vec::new(),
            }],
        };

        assert_eq!(snapshot.verify(), Err(ModelError::DuplicateChildRef(0)));
    }

    #[test]
    fn test_serde_round_trip_preserves_topology() {
        let snapshot = sample_snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: ModelSnapshot = serde_json::from_str(&json).unwrap();

        decoded.verify().unwrap();
        assert_eq!(decoded.snapshot_id(), snapshot.snapshot_id());
        assert_eq!(decoded.module_names(), snapshot.module_names());
        assert_eq!(
            decoded.module("lib-core").unwrap().content_roots(),
            snapshot.module("lib-core").unwrap().content_roots()
        );
    }

    #[test]
    fn test_snapshot_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ModelSnapshot>();
    }
}
