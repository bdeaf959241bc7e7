// ehm.rs — Error handling module
//
// Every fallible operation in the alias subsystem returns Result<T, AppError>
// and propagates with `?`.  The reader collapses failures to "no alias"; the
// writer surfaces them to the caller, which reports them as a failed write.

use std::path::PathBuf;

use thiserror::Error;





/// Unified error type for FolderAlias.
#[derive(Debug, Error)]
pub enum AppError {
    /// Win32 API error (wraps windows::core::Error)
    #[cfg(windows)]
    #[error("{0}")]
    Win32(#[from] windows::core::Error),

    /// Standard I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Invalid command-line argument (triggers usage display + exit 1)
    #[error("{0}")]
    InvalidArg(String),

    /// Path does not exist
    #[error("Error:   {} does not exist", .0.display())]
    PathNotFound(PathBuf),

    /// Text contains characters the target codepage cannot represent
    #[error("Error:   {} cannot represent the text written to {}", .encoding, .path.display())]
    UnmappableText {
        encoding: &'static str,
        path:     PathBuf,
    },
}
