use crate::Param;

/// A material lacks a parameter and the parameter has no default.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parameter `{0}` is not set")]
pub struct MissingParameter(pub Param);

/// Failure raised by the body of a reflectance law.
///
/// It doesn't know which law it comes from; [`LawError`] attaches the law
/// name once the failure leaves the registry or the evaluator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LawFault {
    /// The material lacks a parameter required by the law.
    #[error("missing parameter `{0}`")]
    MissingParameter(Param),
    /// The computation is undefined for the given inputs.
    #[error("{0}")]
    Domain(String),
    /// The law is a declared placeholder without a computation.
    #[error("not implemented")]
    Unimplemented,
}

impl From<MissingParameter> for LawFault {
    fn from(err: MissingParameter) -> Self { LawFault::MissingParameter(err.0) }
}

/// Error raised when invoking or registering a reflectance law.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LawError {
    /// The material lacks a parameter required by the law.
    #[error("law `{law}` requires parameter `{param}` which is not set on the material")]
    MissingParameter {
        /// Name of the law.
        law: String,
        /// The missing parameter.
        param: Param,
    },
    /// A numeric operation of the law is undefined for the given inputs.
    #[error("law `{law}` is undefined here: {reason}")]
    Domain {
        /// Name of the law.
        law: String,
        /// What went wrong.
        reason: String,
    },
    /// The law is declared in the catalogue but has no computation.
    #[error("law `{law}` is declared but not implemented")]
    Unimplemented {
        /// Name of the law.
        law: String,
    },
    /// A law with the same name is already registered.
    #[error("law `{0}` is already registered")]
    DuplicateLaw(String),
    /// No law with this name is registered.
    #[error("unknown law `{0}`")]
    UnknownLaw(String),
}

impl LawError {
    /// Attributes a fault to the law named `law`.
    pub fn from_fault(law: &str, fault: LawFault) -> Self {
        match fault {
            LawFault::MissingParameter(param) => LawError::MissingParameter {
                law: law.to_string(),
                param,
            },
            LawFault::Domain(reason) => LawError::Domain {
                law: law.to_string(),
                reason,
            },
            LawFault::Unimplemented => LawError::Unimplemented {
                law: law.to_string(),
            },
        }
    }
}
