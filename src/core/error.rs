use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PmErrorKind {
    Warning,
    Error,
}

/// Crate-wide error value. Numerical degeneracies inside the intersection
/// and scattering routines are never reported through this type; those are
/// silent "no update" outcomes. This is for fallible construction and for
/// the scene-description loader.
#[derive(Debug, Clone)]
pub struct PmError {
    pub kind: PmErrorKind,
    pub message: String,
}

impl PmError {
    pub fn error(msg: &str) -> Self {
        PmError {
            kind: PmErrorKind::Error,
            message: String::from(msg),
        }
    }

    pub fn warning(msg: &str) -> Self {
        PmError {
            kind: PmErrorKind::Warning,
            message: String::from(msg),
        }
    }
}

impl fmt::Display for PmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PmErrorKind::Warning => write!(f, "warning: {}", self.message),
            PmErrorKind::Error => write!(f, "error: {}", self.message),
        }
    }
}

impl std::error::Error for PmError {}

impl From<std::io::Error> for PmError {
    fn from(e: std::io::Error) -> Self {
        PmError::error(&e.to_string())
    }
}

impl From<serde_json::Error> for PmError {
    fn from(e: serde_json::Error) -> Self {
        PmError::error(&e.to_string())
    }
}
