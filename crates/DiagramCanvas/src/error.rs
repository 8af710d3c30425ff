use thiserror::Error;

/// Fatal errors raised while setting up a Surface.
///
/// These indicate an integration bug; nothing at runtime produces them.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The drawing backend reported a size that cannot be painted.
    #[error("drawing surface has unusable size {width}x{height}")]
    InvalidSurfaceSize { width: f32, height: f32 },

    /// A configuration value is out of range.
    #[error("invalid surface configuration: {0}")]
    InvalidConfig(String),

    /// The configuration document could not be parsed.
    #[error("failed to parse surface configuration: {0}")]
    Config(#[from] serde_json::Error),
}
