use core::{error, fmt};

/// Errors raised whilst running sigcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Argument parsed into function were invalid.
    #[cfg(feature = "alloc")]
    InvalidArg {
        /// The invalid arg
        arg: alloc::string::String,
        /// Explaining why arg is invalid.
        reason: alloc::string::String,
    },
    /// Argument parsed into function were invalid.
    #[cfg(not(feature = "alloc"))]
    InvalidArg,
    /// The direct convolution backend rejected its operands.
    #[cfg(feature = "alloc")]
    Conv {
        /// Backend error message.
        reason: alloc::string::String,
    },
    /// The direct convolution backend rejected its operands.
    #[cfg(not(feature = "alloc"))]
    Conv,
    /// Two sequences that must agree in length did not.
    LengthMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
}

impl Error {
    /// Shorthand for [`Error::InvalidArg`].
    #[cfg(feature = "alloc")]
    pub fn invalid_arg(arg: &str, reason: &str) -> Self {
        use alloc::string::ToString;
        Error::InvalidArg {
            arg: arg.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "alloc")]
            Error::InvalidArg { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            #[cfg(not(feature = "alloc"))]
            Error::InvalidArg => write!(f, "Invalid argument."),
            #[cfg(feature = "alloc")]
            Error::Conv { reason } => write!(f, "Convolution failed: {reason}"),
            #[cfg(not(feature = "alloc"))]
            Error::Conv => write!(f, "Convolution failed."),
            Error::LengthMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Length mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
        }
    }
}

impl error::Error for Error {}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_argument() {
        let err = Error::invalid_arg("a", "leading coefficient must be non-zero");
        assert_eq!(
            err.to_string(),
            "Invalid argument `a`: leading coefficient must be non-zero"
        );

        let err = Error::LengthMismatch {
            arg: "zi",
            expected: 2,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "Length mismatch on `zi`. Expected 2, got 3."
        );
    }
}
