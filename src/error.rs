//! Error type shared by layout construction and settings I/O.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot lay out an empty graph")]
    EmptyGraph,

    #[error("invalid canvas size {width}x{height}")]
    CanvasSize { width: f64, height: f64 },

    #[error("failed to access settings file {path:?}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path:?}: {source}")]
    SettingsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
