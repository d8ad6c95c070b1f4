use std::fmt;

/// Failures at the compositor boundary of a session.
///
/// Neither variant aborts the switcher: a missing window list becomes an empty
/// one, and a failed activation still closes the session.
#[derive(Debug)]
pub enum SwitcherError {
    SourceUnavailable(anyhow::Error),
    ActivationFailed {
        address: String,
        source: anyhow::Error,
    },
}

impl fmt::Display for SwitcherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitcherError::SourceUnavailable(_) => write!(f, "could not load window list"),
            SwitcherError::ActivationFailed { address, .. } => {
                write!(f, "failed to activate window {}", address)
            }
        }
    }
}

impl std::error::Error for SwitcherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SwitcherError::SourceUnavailable(e) => Some(&**e),
            SwitcherError::ActivationFailed { source, .. } => Some(&**source),
        }
    }
}
