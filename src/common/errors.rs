use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while stamping a single file, plus the one
/// startup failure a worker can hit before it touches any file.
#[derive(Debug, Error)]
pub enum StampError {
    /// The work item could not be resolved through its symlink.
    #[error("failed to resolve symlink {path:?}")]
    SymlinkRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The resolved target name does not carry a usable epoch token.
    #[error("cannot derive a timestamp from {file_name:?}: {reason}")]
    TimestampFormat { file_name: String, reason: String },

    /// Decoding or encoding the image failed.
    #[error("image I/O failed for {path:?}")]
    ImageIo {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The caption font could not be located or parsed at worker startup.
    #[error("caption font unavailable: {detail}")]
    FontLoad { detail: String },
}
