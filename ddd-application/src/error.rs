use ddd_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(String),

    #[error("mapping already registered: event={event}")]
    AlreadyRegisteredMapping { event: &'static str },

    #[error("wrapper already registered: event={event}")]
    AlreadyRegisteredWrapper { event: &'static str },

    #[error("wrapper not registered: event_type={event_type}")]
    WrapperNotRegistered { event_type: String },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
