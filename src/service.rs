use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ServiceError;
use crate::heuristic;
use crate::mock;
use crate::models::{Envelope, ModelMetrics, Review, TrainingProgress};

pub const NOT_FOUND_MESSAGE: &str = "Review not found";

/// `Err` is reserved for unexpected faults; a missing review is reported in the envelope.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    async fn list_reviews(&self) -> Result<Envelope<Vec<Review>>, ServiceError>;
    async fn get_review(&self, id: i64) -> Result<Envelope<Review>, ServiceError>;
    async fn get_metrics(&self) -> Result<Envelope<ModelMetrics>, ServiceError>;
    async fn get_training_progress(&self) -> Result<Envelope<TrainingProgress>, ServiceError>;
    async fn classify(&self, text: &str) -> Result<Envelope<Review>, ServiceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub list_reviews: Duration,
    pub get_review: Duration,
    pub metrics: Duration,
    pub training_progress: Duration,
    pub classify: Duration,
}

impl Latency {
    pub fn simulated() -> Self {
        Self {
            list_reviews: Duration::from_millis(500),
            get_review: Duration::from_millis(300),
            metrics: Duration::from_millis(400),
            training_progress: Duration::from_millis(300),
            classify: Duration::from_millis(800),
        }
    }

    pub fn instant() -> Self {
        Self {
            list_reviews: Duration::ZERO,
            get_review: Duration::ZERO,
            metrics: Duration::ZERO,
            training_progress: Duration::ZERO,
            classify: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

pub type Clock = fn() -> DateTime<Utc>;

// The random source is never held across an `.await`.
pub struct SentimentService {
    rng: Mutex<StdRng>,
    latency: Latency,
    clock: Clock,
}

impl SentimentService {
    pub fn new(rng: StdRng, latency: Latency) -> Self {
        Self {
            rng: Mutex::new(rng),
            latency,
            clock: Utc::now,
        }
    }

    pub fn seeded(seed: u64, latency: Latency) -> Self {
        Self::new(StdRng::seed_from_u64(seed), latency)
    }

    pub fn from_entropy(latency: Latency) -> Self {
        Self::new(StdRng::from_entropy(), latency)
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T, ServiceError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ServiceError::RandomSourcePoisoned)?;
        Ok(f(&mut rng))
    }

    fn reviews(&self) -> Result<Vec<Review>, ServiceError> {
        let now = (self.clock)();
        self.with_rng(|rng| mock::generate_reviews(rng, now))
    }
}

async fn simulate_round_trip(operation: &'static str, delay: Duration) {
    tracing::debug!(
        operation,
        delay_ms = delay.as_millis() as u64,
        "simulated round trip"
    );
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl ReviewApi for SentimentService {
    async fn list_reviews(&self) -> Result<Envelope<Vec<Review>>, ServiceError> {
        simulate_round_trip("list_reviews", self.latency.list_reviews).await;
        Ok(Envelope::success(self.reviews()?))
    }

    async fn get_review(&self, id: i64) -> Result<Envelope<Review>, ServiceError> {
        simulate_round_trip("get_review", self.latency.get_review).await;
        let mut reviews = self.reviews()?;

        if let Some(position) = reviews.iter().position(|review| review.id == id) {
            return Ok(Envelope::success(reviews.swap_remove(position)));
        }

        tracing::warn!(id, "review not found, returning fallback record");
        let fallback = reviews.swap_remove(0);
        Ok(Envelope::error(fallback, NOT_FOUND_MESSAGE))
    }

    async fn get_metrics(&self) -> Result<Envelope<ModelMetrics>, ServiceError> {
        simulate_round_trip("get_metrics", self.latency.metrics).await;
        Ok(Envelope::success(mock::model_metrics()))
    }

    async fn get_training_progress(&self) -> Result<Envelope<TrainingProgress>, ServiceError> {
        simulate_round_trip("get_training_progress", self.latency.training_progress).await;
        Ok(Envelope::success(mock::training_progress()))
    }

    async fn classify(&self, text: &str) -> Result<Envelope<Review>, ServiceError> {
        simulate_round_trip("classify", self.latency.classify).await;

        let tally = heuristic::tally_keywords(text);
        let sentiment = tally.sentiment();
        let confidence = self.with_rng(|rng| rng.gen_range(0.75_f64..0.95))?;
        let now = (self.clock)();

        tracing::debug!(
            positive = tally.positive_count(),
            negative = tally.negative_count(),
            %sentiment,
            "classified review"
        );

        Ok(Envelope::success(Review {
            id: now.timestamp_millis(),
            text: text.to_string(),
            sentiment,
            confidence,
            timestamp: mock::iso_timestamp(now),
        }))
    }
}
