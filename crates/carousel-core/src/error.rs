#![forbid(unsafe_code)]

//! Error types for carousel construction and node hosting.

use crate::window::Lane;

/// Reasons a carousel cannot be built or a node operation failed.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselError {
    /// A lane was configured with no entries to rotate through.
    EmptyList { lane: Lane },
    /// The initial cursor does not point into its list.
    CursorOutOfRange { lane: Lane, index: usize, len: usize },
    /// Window bounds are inverted or do not contain the focused offset 0.
    InvalidBounds { lane: Lane, min: i32, max: i32 },
    /// A pixel dimension is non-finite or not strictly positive.
    InvalidDimension { name: &'static str, value: f64 },
    /// An opacity is non-finite or outside `0.0..=1.0`.
    InvalidOpacity { name: &'static str, value: f64 },
    /// The wheel threshold is non-finite or not strictly positive.
    InvalidThreshold(f64),
    /// The JSON configuration could not be decoded.
    Config(String),
    /// The node host failed while creating, restyling or removing a node.
    Host { lane: Lane, message: String },
}

impl CarouselError {
    pub(crate) fn host(lane: Lane, err: &impl core::fmt::Display) -> Self {
        Self::Host {
            lane,
            message: err.to_string(),
        }
    }
}

impl core::fmt::Display for CarouselError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyList { lane } => write!(f, "{lane} list is empty"),
            Self::CursorOutOfRange { lane, index, len } => {
                write!(f, "{lane} cursor {index} is out of range for {len} entries")
            }
            Self::InvalidBounds { lane, min, max } => {
                write!(f, "{lane} window bounds {min}..={max} must contain offset 0")
            }
            Self::InvalidDimension { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::InvalidOpacity { name, value } => {
                write!(f, "{name} must be within 0..=1, got {value}")
            }
            Self::InvalidThreshold(value) => {
                write!(f, "wheel threshold must be finite and positive, got {value}")
            }
            Self::Config(msg) => write!(f, "invalid carousel config: {msg}"),
            Self::Host { lane, message } => write!(f, "{lane} host error: {message}"),
        }
    }
}

impl std::error::Error for CarouselError {}

impl From<serde_json::Error> for CarouselError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
