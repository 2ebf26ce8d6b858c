//! Producer-side snapshot construction.
//!
//! Construction is arena-style: collect fully-specified drafts, validate
//! every invariant, then wire the project's child list and freeze. A
//! snapshot is either complete and valid or never observable.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{ModelError, Result};
use crate::model::{BuildTask, ModuleData, ModuleId, ProjectData};
use crate::snapshot::ModelSnapshot;

/// Draft of the project root node
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    name: String,
    description: Option<String>,
    root_dir: PathBuf,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            description: None,
            root_dir: root_dir.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Draft of one module node
#[derive(Debug, Clone)]
pub struct ModuleDraft {
    name: String,
    description: Option<String>,
    content_roots: Vec<PathBuf>,
    buildable: bool,
    tasks: Vec<BuildTask>,
}

impl ModuleDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            content_roots: Vec::new(),
            buildable: true,
            tasks: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a content root; order is preserved in the snapshot
    pub fn with_content_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.content_roots.push(root.into());
        self
    }

    pub fn with_content_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.content_roots = roots;
        self
    }

    pub fn with_buildable(mut self, buildable: bool) -> Self {
        self.buildable = buildable;
        self
    }

    pub fn with_task(mut self, task: BuildTask) -> Self {
        self.tasks.push(task);
        self
    }
}

/// Assembles one immutable [`ModelSnapshot`].
///
/// Modules drafted without a project cannot be published: `build` rejects
/// the whole snapshot instead of exposing a node with no parent.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    project: Option<ProjectDraft>,
    modules: Vec<ModuleDraft>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project root node. The last call wins.
    pub fn project(mut self, project: ProjectDraft) -> Self {
        self.project = Some(project);
        self
    }

    /// Add a module owned by the project
    pub fn module(mut self, module: ModuleDraft) -> Self {
        self.modules.push(module);
        self
    }

    /// Validate every draft and freeze the snapshot.
    pub fn build(self) -> Result<ModelSnapshot> {
        let project = self.project.ok_or(ModelError::MissingProject)?;
        if project.name.is_empty() {
            return Err(ModelError::EmptyProjectName);
        }
        if !project.root_dir.is_absolute() {
            return Err(ModelError::RelativeProjectRoot(
                project.root_dir.display().to_string(),
            ));
        }

        let mut names: HashSet<&str> = HashSet::new();
        for draft in &self.modules {
            if draft.name.is_empty() {
                return Err(ModelError::EmptyModuleName);
            }
            if !names.insert(draft.name.as_str()) {
                return Err(ModelError::DuplicateModule(draft.name.clone()));
            }
            for root in &draft.content_roots {
                if !root.is_absolute() {
                    return Err(ModelError::RelativeContentRoot {
                        module: draft.name.clone(),
                        path: root.display().to_string(),
                    });
                }
            }
        }

        // Every node validated; wire the child list and freeze.
        let child_ids: Vec<ModuleId> = (0..self.modules.len() as u32).map(ModuleId).collect();
        let modules: Vec<ModuleData> = self
            .modules
            .into_iter()
            .map(|draft| ModuleData {
                name: draft.name,
                description: draft.description,
                content_roots: draft.content_roots,
                buildable: draft.buildable,
                tasks: draft.tasks,
            })
            .collect();

        let snapshot = ModelSnapshot::new(
            ProjectData {
                name: project.name,
                description: project.description,
                root_dir: project.root_dir,
                modules: child_ids,
            },
            modules,
        );

        tracing::debug!(
            "froze model snapshot {}: project '{}', {} modules",
            snapshot.snapshot_id(),
            snapshot.project().name(),
            snapshot.module_count()
        );

        Ok(snapshot)
    }
}
