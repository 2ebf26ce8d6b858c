use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("snapshot has no project node; modules cannot be published without a parent")]
    MissingProject,

    #[error("project name must not be empty")]
    EmptyProjectName,

    #[error("module name must not be empty")]
    EmptyModuleName,

    #[error("duplicate module name: {0}")]
    DuplicateModule(String),

    #[error("project root must be an absolute path: {0}")]
    RelativeProjectRoot(String),

    #[error("content root of module '{module}' must be an absolute path: {path}")]
    RelativeContentRoot { module: String, path: String },

    #[error("module '{0}' is not wired into the project's child list")]
    UnrootedModule(String),

    #[error("project child list references a module that is not in the snapshot: {0}")]
    DanglingChildRef(u32),

    #[error("module is wired into the project's child list more than once: {0}")]
    DuplicateChildRef(u32),
}

pub type Result<T> = std::result::Result<T, ModelError>;
