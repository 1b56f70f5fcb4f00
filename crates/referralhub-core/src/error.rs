use thiserror::Error;

/// Reasons a persisted session cannot be restored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("token is not a three part jwt")]
    MalformedToken,
    #[error("token payload is not base64url: {0}")]
    InvalidEncoding(String),
    #[error("token claims are not valid json: {0}")]
    InvalidClaims(String),
    #[error("stored user record is invalid: {0}")]
    InvalidUser(String),
    #[error("token expired at {0}")]
    Expired(i64),
}

/// Client side form checks, the display text is shown inline as is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingCredentials,
    #[error("Password must be at least {0} characters.")]
    PasswordTooShort(usize),
    #[error("All fields are required.")]
    MissingCandidateFields,
    #[error("Experience must be a whole number of years.")]
    InvalidExperience,
    #[error("Please enter a Candidate ID.")]
    MissingCandidateId,
}
