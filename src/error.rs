use std::fmt;

#[derive(Debug)]
pub enum TaggerError {
    /// No recognizable tag container in the image bytes. Callers on the write
    /// path fall back to an empty block instead of aborting.
    MalformedContainer(String),
    /// Sidecar could not be read or parsed; extraction degrades to absent fields.
    SidecarUnreadable(String),
    /// The underlying storage rejected a write.
    WriteFailed(String),
    /// A folder or export picker was cancelled. Not reported to the user.
    AbortedByUser,
    /// The host lacks the required file-system capability.
    UnsupportedEnvironment(String),
    Io(std::io::Error),
}

impl TaggerError {
    /// Errors that callers swallow silently rather than surface.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::AbortedByUser)
    }
}

impl fmt::Display for TaggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedContainer(detail) => write!(f, "malformed tag container: {detail}"),
            Self::SidecarUnreadable(detail) => write!(f, "sidecar unreadable: {detail}"),
            Self::WriteFailed(detail) => write!(f, "write failed: {detail}"),
            Self::AbortedByUser => write!(f, "aborted by user"),
            Self::UnsupportedEnvironment(detail) => {
                write!(f, "unsupported environment: {detail}")
            }
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for TaggerError {}

impl From<std::io::Error> for TaggerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

pub type Result<T> = std::result::Result<T, TaggerError>;
