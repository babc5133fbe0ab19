//! Error type for invalid arguments.
//!
//! Not finding a hand is not an error: extraction returns an empty
//! [`LandmarkList`][crate::extract::LandmarkList] in that case.

use std::fmt;

/// An invalid argument passed to one of this crate's operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The image width or height is zero.
    InvalidDimensions { width: u32, height: u32 },
    /// A hand index was requested that is not present in a non-empty detection result.
    InvalidHandIndex { index: usize, hands: usize },
    /// A landmark coordinate is non-finite, or does not fit into the pixel coordinate range.
    InvalidLandmark { id: usize },
    /// A landmark id outside of 0 to 20.
    UnknownLandmark { id: usize },
    /// A point passed to the distance calculation is missing or malformed.
    InvalidPoint(String),
    /// A hand was constructed from the wrong number of landmarks.
    LandmarkCount { expected: usize, actual: usize },
    /// A [`DetectorConfig`][crate::config::DetectorConfig] value is out of range or unparseable.
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "invalid image dimensions {width}x{height}")
            }
            Error::InvalidHandIndex { index, hands } => write!(
                f,
                "invalid hand index {index} (only {hands} hand(s) detected)"
            ),
            Error::InvalidLandmark { id } => {
                write!(f, "landmark {id} has an invalid coordinate")
            }
            Error::UnknownLandmark { id } => {
                write!(f, "unknown landmark id {id} (expected 0 to 20)")
            }
            Error::InvalidPoint(msg) => write!(f, "invalid point: {msg}"),
            Error::LandmarkCount { expected, actual } => {
                write!(f, "expected {expected} landmarks, got {actual}")
            }
            Error::InvalidConfig(msg) => write!(f, "invalid detector configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type used by this crate's fallible operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
