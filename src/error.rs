use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("random source unavailable: a previous call panicked while holding it")]
    RandomSourcePoisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a review to analyze")]
    Empty,

    #[error("Review must be at least {min} characters long")]
    TooShort { min: usize },
}
