use thiserror::Error;

pub type AnimationResult<T> = Result<T, AnimationError>;

#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("no frame or group named {name:?}")]
    NotFound { name: String },

    #[error("animation interrupted before completion")]
    Interrupted,

    #[error("renderer transition failed: {0}")]
    Renderer(String),
}
