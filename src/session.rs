use serde::Serialize;

use crate::error::{ServiceError, ValidationError};
use crate::models::{Envelope, ModelMetrics, Review, TrainingProgress};
use crate::service::ReviewApi;

pub const MIN_REVIEW_CHARS: usize = 5;
pub const ANALYZE_FAILED: &str = "Failed to analyze review";
pub const ANALYZE_FAULT: &str = "An error occurred while analyzing the review";

pub fn validate_review_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    let visible = text.chars().filter(|c| !c.is_whitespace()).count();
    if visible < MIN_REVIEW_CHARS {
        return Err(ValidationError::TooShort {
            min: MIN_REVIEW_CHARS,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct ReviewWidget {
    text: String,
    prediction: Option<Review>,
    error: Option<String>,
}

impl ReviewWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn prediction(&self) -> Option<&Review> {
        self.prediction.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn analyze<A: ReviewApi + ?Sized>(&mut self, api: &A) {
        if let Err(invalid) = validate_review_text(&self.text) {
            self.error = Some(invalid.to_string());
            return;
        }

        self.error = None;

        match api.classify(&self.text).await {
            Ok(envelope) if envelope.is_success() => self.prediction = Some(envelope.data),
            Ok(envelope) => {
                let message = envelope.message.as_deref().unwrap_or(ANALYZE_FAILED);
                self.error = Some(message.to_string());
            }
            Err(err) => {
                tracing::error!(error = %err, "classification call failed");
                self.error = Some(ANALYZE_FAULT.to_string());
            }
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.prediction = None;
        self.error = None;
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Dashboard {
    pub reviews: Vec<Review>,
    pub metrics: Option<ModelMetrics>,
    pub progress: Option<TrainingProgress>,
}

// One failing call leaves its slot empty without affecting the others.
pub async fn load_dashboard<A: ReviewApi + ?Sized>(api: &A) -> Dashboard {
    let (reviews, metrics, progress) = tokio::join!(
        api.list_reviews(),
        api.get_metrics(),
        api.get_training_progress()
    );

    let mut dashboard = Dashboard::default();
    if let Some(reviews) = settle("list_reviews", reviews) {
        dashboard.reviews = reviews;
    }
    dashboard.metrics = settle("get_metrics", metrics);
    dashboard.progress = settle("get_training_progress", progress);
    dashboard
}

fn settle<T>(operation: &'static str, result: Result<Envelope<T>, ServiceError>) -> Option<T> {
    match result {
        Ok(envelope) if envelope.is_success() => Some(envelope.data),
        Ok(envelope) => {
            tracing::warn!(operation, message = ?envelope.message, "call returned an error status");
            None
        }
        Err(err) => {
            tracing::warn!(operation, error = %err, "failed to fetch dashboard data");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub review: Review,
    pub notice: Option<String>,
}

pub async fn load_detail<A: ReviewApi + ?Sized>(api: &A, id: i64) -> Result<Detail, ServiceError> {
    let envelope = api.get_review(id).await?;
    let notice = if envelope.is_success() {
        None
    } else {
        Some(
            envelope
                .message
                .clone()
                .unwrap_or_else(|| format!("Review {id} is unavailable")),
        )
    };
    Ok(Detail {
        review: envelope.data,
        notice,
    })
}
