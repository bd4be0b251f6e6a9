use std::path::PathBuf;

use thiserror::Error;

/// Failure classes surfaced by the core.
///
/// Every variant renders to a human readable description; callers that
/// need to react differently per cause match on the variant instead of
/// parsing the message.
#[derive(Debug, Error)]
pub enum Error {
    /// The legendary executable could not be started at all.
    #[error("could not start {executable}: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and reported failure through its exit code.
    #[error("legendary {command} exited with code {code}: {stderr}")]
    Process {
        command: String,
        code: i32,
        stderr: String,
    },

    /// The tool rejected the login on stderr, independent of exit code.
    #[error("login rejected: {reason}")]
    Auth { reason: String },

    /// Output or an on-disk document did not match the expected schema.
    #[error("could not decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A legendary-owned file could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
