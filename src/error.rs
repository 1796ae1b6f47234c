use std::fmt;

use thiserror::Error;

/// Dotted path to the nested field where reflection went wrong,
/// e.g. `errorReport.errorCause`. Empty for the target node itself.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Trail(Vec<String>);

impl Trail {
    pub fn root() -> Self {
        Self(Vec::new())
    }
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
    pub fn segments(&self) -> &[String] {
        &self.0
    }
    fn prepend(&mut self, segment: &str) {
        self.0.insert(0, segment.to_owned());
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "target")
        } else {
            write!(f, "{}", self.0.join("."))
        }
    }
}

#[derive(Error, Debug)]
pub enum ToxigraphError {
    #[error("Transport error: {message}")]
    Transport { status: Option<u16>, message: String },
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Structural error at {trail}: {message}")]
    Structural { trail: Trail, message: String },
    #[error("Parse error at {trail}: '{literal}' is not a valid {expected} for {field}")]
    Parse {
        trail: Trail,
        literal: String,
        expected: &'static str,
        field: String,
    },
    #[error("Syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("Config error: {0}")]
    Config(String),
    #[error("Watch interrupted: {0}")]
    Interrupted(String),
}

pub type Result<T> = std::result::Result<T, ToxigraphError>;

impl ToxigraphError {
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            trail: Trail::root(),
            message: message.into(),
        }
    }

    /// Records that the error surfaced while reflecting the named nested
    /// field. Only structural and parse errors carry a trail; the rest
    /// pass through untouched.
    pub fn via(mut self, segment: &str) -> Self {
        match &mut self {
            Self::Structural { trail, .. } | Self::Parse { trail, .. } => trail.prepend(segment),
            _ => (),
        }
        self
    }

    pub fn trail(&self) -> Option<&Trail> {
        match self {
            Self::Structural { trail, .. } | Self::Parse { trail, .. } => Some(trail),
            _ => None,
        }
    }
}

// Helper conversions
impl From<config::ConfigError> for ToxigraphError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
