use thiserror::Error;

/// The error type shared by the trajectory data model and algorithms.
///
/// Algorithms return these without side effects and never panic on
/// user-supplied data. Lenient subsystems (the trajectory assembler, interval
/// subsetting) log and recover instead of returning the corresponding
/// variants; strict subsystems (the R-tree, DBSCAN, plane fitting) abort the
/// whole operation, since a partial result would be silently wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Error {
    /// The operation needs more input points than were supplied.
    #[error("operation requires at least {required} points, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    /// Every input position is the same point, so no plane is defined.
    #[error("all input positions are identical")]
    IdenticalPositions,

    /// A plane normal with zero magnitude was supplied.
    #[error("plane normal has zero magnitude")]
    ZeroNorm,

    /// A property was requested by a key that is not present.
    #[error("no property named `{0}`")]
    PropertyDoesNotExist(String),

    /// A property is present but holds a different type than requested.
    #[error("property `{key}` holds a {found} value, expected {expected}")]
    PropertyTypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Two inputs that must share a dimension do not.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Timestamps run backwards where they must be non-decreasing.
    #[error("timestamps are not monotonically non-decreasing")]
    NonMonotonicTimestamps,

    /// The input spans a hemisphere or more, so its spherical hull is
    /// undefined.
    #[error("input spans a hemisphere or more")]
    TooLargeHemisphere,

    /// A delimited-text record could not be split into the expected fields.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A timestamp field could not be parsed.
    #[error("unparseable timestamp: {0}")]
    BadTimestamp(String),

    /// A token with no meaning in the current context.
    #[error("unknown token: {0}")]
    UnknownToken(String),
}
