use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure conditions that abort an alignment run.
/// These get boxed into `Box<dyn Error>` at the API boundary, use `downcast_ref` to match on them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MsaError {
    /// A caller-provided value is out of range, e.g. a k-mer length of zero
    InvalidParameter(String),

    /// The guide tree or the input id set is malformed; the run cannot continue
    StructuralError(String),
}

impl Error for MsaError {}

impl Display for MsaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
            Self::StructuralError(msg) => write!(f, "Structural error: {msg}"),
        }
    }
}

impl MsaError {
    /// Convenience for building a boxed `InvalidParameter`
    pub fn invalid_parameter(msg: impl Into<String>) -> Box<dyn Error> {
        Box::new(Self::InvalidParameter(msg.into()))
    }

    /// Convenience for building a boxed `StructuralError`
    pub fn structural(msg: impl Into<String>) -> Box<dyn Error> {
        Box::new(Self::StructuralError(msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast() {
        let err = MsaError::structural("dangling operand 7");
        assert_eq!(err.to_string(), "Structural error: dangling operand 7");
        assert_eq!(
            err.downcast_ref::<MsaError>(),
            Some(&MsaError::StructuralError("dangling operand 7".to_string()))
        );
    }
}
