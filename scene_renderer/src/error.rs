use thiserror::Error;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ResourceKind {
    Shader,
    Texture,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Shader => write!(f, "shader"),
            ResourceKind::Texture => write!(f, "texture"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ContextInitError {
    #[error("could not create GPU context: {0}")]
    ContextCreation(String),
    #[error("could not load GPU functions: {0}")]
    FunctionLoading(String),
    #[error("could not initialize image subsystem: {0}")]
    ImageSubsystem(String),
}

#[derive(Debug, Error)]
pub enum RendererError {
    #[error(transparent)]
    ContextInit(#[from] ContextInitError),
    #[error("{kind} not found, name = {name}")]
    ResourceNotFound { kind: ResourceKind, name: String },
    #[error("renderer is closed")]
    Closed,
}
