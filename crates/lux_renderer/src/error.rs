//! Error types for rendering and scene loading.

use std::io;
use thiserror::Error;

/// Errors that abort a render.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write image: {0}")]
    Io(#[from] io::Error),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("a render worker panicked")]
    WorkerPanicked,

    #[error("the scanline writer panicked")]
    WriterPanicked,

    #[error("image incomplete: wrote {written} of {expected} scanlines")]
    IncompleteImage { written: u32, expected: u32 },

    #[error("render cancelled after {written} scanlines")]
    Cancelled { written: u32 },
}

/// Errors from reading a scene description.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid sphere #{index}: {reason}")]
    InvalidSphere { index: usize, reason: &'static str },
}
