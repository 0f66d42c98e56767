/// Errors returned by the lifecycle and processing operations in this crate.
///
/// Every failure is local and recoverable: the caller can re-initialize the
/// component or correct its inputs. Nothing in the library panics or retries
/// internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioError {
    /// Operation invoked on an instance that was never initialized or has
    /// already been shut down.
    NotInitialized,
    /// `initialize` called twice without an intervening shutdown.
    AlreadyInitialized,
    /// A caller-supplied argument violated the operation's contract.
    InvalidParameter { reason: &'static str },
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NotInitialized => write!(f, "component is not initialized"),
            AudioError::AlreadyInitialized => write!(f, "component is already initialized"),
            AudioError::InvalidParameter { reason } => {
                write!(f, "invalid parameter: {}", reason)
            }
        }
    }
}

impl std::error::Error for AudioError {}

pub type AudioResult<T> = Result<T, AudioError>;
