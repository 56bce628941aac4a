use thiserror::Error;

use crate::gl::StageKind;

/// Reasons the background effect does not start.
///
/// Every variant is logged once where it happens; the host page never sees
/// anything but its static background.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("surface element `{0}` not found")]
    SurfaceMissing(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("WebGL2 not available")]
    ContextUnavailable,
    #[error("failed to create {0}")]
    Allocation(&'static str),
    #[error("{stage} shader compile error: {log}")]
    Compile { stage: StageKind, log: String },
    #[error("program link error: {0}")]
    Link(String),
    #[error("host error: {0}")]
    Host(String),
}
