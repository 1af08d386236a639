//! Error types shared across the crate.
//!
//! Nothing in the scene switching path propagates these to the frame loop:
//! the [`SceneManager`](crate::scene::SceneManager) logs and discards them.

use thiserror::Error;

use crate::scene::SceneKey;

/// Failures raised by scene factories and scene disposal.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A factory could not build its scene.
    #[error("scene construction failed: {0}")]
    Construction(String),
    /// A scene failed while tearing itself down.
    #[error("scene disposal failed: {0}")]
    Disposal(String),
    /// The scene table has no factory for this key.
    #[error("unknown scene key: {0}")]
    UnknownKey(SceneKey),
    /// A resource handle was misused while building or releasing a scene.
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Misuse of geometry and material handles.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("geometry {0} was never allocated")]
    UnknownGeometry(u32),
    #[error("material {0} was never allocated")]
    UnknownMaterial(u32),
    #[error("{kind} {id} was already released")]
    AlreadyReleased { kind: &'static str, id: u32 },
}

/// Problems reading or validating [`AppConfig`](crate::AppConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// GPU initialization failures.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("couldn't create a surface for the window: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("couldn't create the GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
