//! Filesystem errors raised while discovering sources and writing headers.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    /// The root directory could not be opened. Fatal for the whole run.
    #[error("cannot read root directory {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The root exists but is not a directory. Fatal for the whole run.
    #[error("root is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Two sources resolve to the same header (e.g. through a symlinked directory).
    #[error("header {} is already produced by {}", header.display(), first.display())]
    HeaderCollision { header: PathBuf, first: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_directory_message() {
        let err = FsError::NotADirectory {
            path: PathBuf::from("main.c"),
        };
        assert_eq!(err.to_string(), "root is not a directory: main.c");
    }

    #[test]
    fn read_error_message_names_the_file() {
        let err = FsError::Read {
            path: PathBuf::from("src/wave.c"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to read src/wave.c: denied");
    }
}
