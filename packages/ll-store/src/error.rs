//! Error types for the LL layer.
//!
//! Errors at this level are persistence-focused. Codec failures and type
//! mismatches belong in higher layers.

/// Errors at the LL (low-level) layer.
#[derive(Debug)]
pub enum LLError {
    /// Generic I/O or transport failure.
    ///
    /// Use this for file I/O errors, IPC failures to a host daemon, etc.
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// The operation is not supported by this store.
    ///
    /// For example, removing a domain from a read-only host store.
    NotSupported,

    /// A persistence domain name the store cannot address.
    InvalidDomain { name: String },

    /// Persisted data could not be interpreted by the store itself.
    Corrupt { message: String },
}

impl std::fmt::Display for LLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLError::Transport(e) => write!(f, "transport error: {}", e),
            LLError::NotSupported => write!(f, "operation not supported"),
            LLError::InvalidDomain { name } => write!(f, "invalid domain name: {:?}", name),
            LLError::Corrupt { message } => write!(f, "corrupt store data: {}", message),
        }
    }
}

impl std::error::Error for LLError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LLError::Transport(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LLError {
    fn from(e: std::io::Error) -> Self {
        LLError::Transport(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_works() {
        let e = LLError::NotSupported;
        assert_eq!(format!("{}", e), "operation not supported");

        let e = LLError::InvalidDomain {
            name: "../etc".to_string(),
        };
        assert!(format!("{}", e).contains("../etc"));

        let e = LLError::Corrupt {
            message: "expected object".to_string(),
        };
        assert!(format!("{}", e).contains("expected object"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ll_err: LLError = io_err.into();
        assert!(matches!(ll_err, LLError::Transport(_)));
        assert!(std::error::Error::source(&ll_err).is_some());
    }
}
