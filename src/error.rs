//! Error types for pipe evaluation.
//!
//! Every failure surfaces through [`PipeError`]. Evaluation stops at the
//! first failure; no partial output is ever returned.

use std::error::Error;
use std::fmt;

/// A boxed error raised by a user-supplied function.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Represents the ways a pipe evaluation can fail.
///
/// # Examples
///
/// ```rust
/// use lazypipe::PipeError;
///
/// let error = PipeError::NotASequence { operator: "take", found: "object" };
/// assert_eq!(
///     format!("{error}"),
///     "take: expected a sequence, found object"
/// );
/// ```
#[derive(Debug)]
pub enum PipeError {
    /// A user-supplied function failed.
    Operator {
        /// The operator whose function failed.
        operator: &'static str,
        /// The error the function returned.
        source: BoxError,
    },
    /// A sequence operator was applied to a value that is not a sequence.
    NotASequence {
        /// The operator that required a sequence.
        operator: &'static str,
        /// The shape of the value it received.
        found: &'static str,
    },
    /// A field projection was applied to a value without fields.
    NotARecord {
        /// The operator that required a record.
        operator: &'static str,
        /// The shape of the value it received.
        found: &'static str,
    },
}

impl PipeError {
    /// Wraps an error returned by the function of `operator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazypipe::PipeError;
    ///
    /// let error = PipeError::operator("try_map", "negative input");
    /// assert_eq!(format!("{error}"), "try_map failed: negative input");
    /// ```
    pub fn operator(operator: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Operator {
            operator,
            source: source.into(),
        }
    }

    /// Returns the name of the operator the error originated in.
    pub const fn operator_name(&self) -> &'static str {
        match self {
            Self::Operator { operator, .. }
            | Self::NotASequence { operator, .. }
            | Self::NotARecord { operator, .. } => *operator,
        }
    }
}

impl fmt::Display for PipeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator { operator, source } => write!(formatter, "{operator} failed: {source}"),
            Self::NotASequence { operator, found } => {
                write!(formatter, "{operator}: expected a sequence, found {found}")
            }
            Self::NotARecord { operator, found } => {
                write!(formatter, "{operator}: expected a record, found {found}")
            }
        }
    }
}

impl Error for PipeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Operator { source, .. } => Some(&**source),
            _ => None,
        }
    }
}
