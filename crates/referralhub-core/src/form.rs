use crate::error::ValidationError;
use crate::models::Role;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// How long a success banner stays up.
pub const SUCCESS_BANNER_DELAY_MS: u32 = 4_000;
/// How long the "Updated!" note next to a status select stays up.
pub const ROW_FEEDBACK_DELAY_MS: u32 = 2_000;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    pub fn validate(email: &str, password: &str) -> Result<Self, ValidationError> {
        if is_blank(email) || password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }

        Ok(Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegisterInput {
    pub fn validate(
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Self, ValidationError> {
        if is_blank(name) || is_blank(email) || password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
        }

        Ok(Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            role,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateInput {
    pub name: String,
    pub email: String,
    pub experience_years: i64,
}

impl CandidateInput {
    pub fn validate(
        name: &str,
        email: &str,
        experience_years: &str,
    ) -> Result<Self, ValidationError> {
        if is_blank(name) || is_blank(email) || is_blank(experience_years) {
            return Err(ValidationError::MissingCandidateFields);
        }

        let experience_years = experience_years
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|years| *years >= 0)
            .ok_or(ValidationError::InvalidExperience)?;

        Ok(Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            experience_years,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralInput {
    pub candidate_id: String,
}

impl ReferralInput {
    pub fn validate(candidate_id: &str) -> Result<Self, ValidationError> {
        if is_blank(candidate_id) {
            return Err(ValidationError::MissingCandidateId);
        }

        Ok(Self {
            candidate_id: candidate_id.trim().to_string(),
        })
    }
}

/// Lifecycle of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Submission<T> {
    #[default]
    Idle,
    Pending,
    Settled(Result<T, String>),
}

impl<T> Submission<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Submission::Pending)
    }

    /// Moves to `Pending`. Returns false, leaving the state untouched, when a
    /// request is already outstanding.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Submission::Pending;
        true
    }

    /// Records the outcome of the outstanding request. A completion that
    /// arrives without one is dropped and false is returned.
    pub fn settle(&mut self, result: Result<T, String>) -> bool {
        if !self.is_pending() {
            warn!("dropping completion of a request that is not pending");
            return false;
        }
        *self = Submission::Settled(result);
        true
    }

    /// Local validation failure, never leaves `Idle` for the network.
    pub fn reject(&mut self, error: ValidationError) {
        *self = Submission::Settled(Err(error.to_string()));
    }

    pub fn reset(&mut self) {
        *self = Submission::Idle;
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Submission::Settled(Err(e)) => Some(e.as_str()),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Submission::Settled(Ok(value)) => Some(value),
            _ => None,
        }
    }
}
