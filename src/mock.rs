use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;

use crate::models::{ChartPoint, ModelMetrics, Review, Sentiment, TrainingProgress};

pub const SAMPLE_REVIEWS: [&str; 10] = [
    "This movie was absolutely fantastic! The acting was superb and the plot kept me engaged throughout.",
    "Terrible waste of time. Poor acting and a confusing storyline that went nowhere.",
    "One of the best films I've seen this year. Highly recommended for everyone!",
    "Disappointing and boring. I expected much more from this director.",
    "Brilliant cinematography and outstanding performances. A masterpiece!",
    "Not worth watching. The script was poorly written and the pacing was awful.",
    "Amazing film with great character development and emotional depth.",
    "Dull and predictable. I couldn't wait for it to end.",
    "Exceptional storytelling with beautiful visuals. Loved every minute!",
    "Complete disaster. Bad directing, bad acting, bad everything.",
];

pub const TEST_ACCURACY: f64 = 0.88;

pub const TRAIN_ACCURACY: [f64; 30] = [
    0.8, 0.89, 0.93, 0.97, 0.98, 0.99, 0.99, 0.99, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];

pub const VALIDATION_ACCURACY: [f64; 30] = [
    0.76, 0.87, 0.88, 0.87, 0.88, 0.87, 0.87, 0.86, 0.87, 0.87, 0.87, 0.86, 0.87, 0.87, 0.86, 0.87,
    0.87, 0.87, 0.87, 0.87, 0.88, 0.87, 0.86, 0.86, 0.86, 0.87, 0.87, 0.87, 0.86, 0.86,
];

pub const ARCHITECTURE: [(&str, &str); 6] = [
    ("Model Type", "LSTM (Long Short-Term Memory)"),
    ("Vocabulary Size", "50,000 words"),
    ("Sequence Length", "500 tokens"),
    ("Embedding Dimension", "128"),
    ("LSTM Units", "64"),
    ("Activation", "Sigmoid (Binary Classification)"),
];

const SAMPLE_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn generate_reviews<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Vec<Review> {
    SAMPLE_REVIEWS
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let age_ms = rng.gen_range(0..SAMPLE_WINDOW_MS);
            Review {
                id: index as i64 + 1,
                text: (*text).to_string(),
                sentiment: if index % 2 == 0 {
                    Sentiment::Positive
                } else {
                    Sentiment::Negative
                },
                confidence: rng.gen_range(0.85_f64..=0.99),
                timestamp: iso_timestamp(now - Duration::milliseconds(age_ms)),
            }
        })
        .collect()
}

pub fn model_metrics() -> ModelMetrics {
    ModelMetrics {
        accuracy: TEST_ACCURACY,
        loss: 0.32,
        epoch: 30,
    }
}

pub fn training_progress() -> TrainingProgress {
    let chart_data = TRAIN_ACCURACY
        .iter()
        .zip(VALIDATION_ACCURACY.iter())
        .enumerate()
        .map(|(index, (training, validation))| ChartPoint {
            epoch: index as u32 + 1,
            training: *training,
            validation: *validation,
            test: TEST_ACCURACY,
        })
        .collect();

    let epochs = TRAIN_ACCURACY.len() as u32;
    TrainingProgress {
        current_epoch: epochs,
        total_epochs: epochs,
        train_accuracy: TRAIN_ACCURACY.to_vec(),
        test_accuracy: TEST_ACCURACY,
        is_training: false,
        chart_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-02-02T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn generates_ten_alternating_reviews() {
        let mut rng = StdRng::seed_from_u64(7);
        let reviews = generate_reviews(&mut rng, fixed_now());
        assert_eq!(reviews.len(), 10);
        for (index, review) in reviews.iter().enumerate() {
            assert_eq!(review.id, index as i64 + 1);
            let expected = if index % 2 == 0 {
                Sentiment::Positive
            } else {
                Sentiment::Negative
            };
            assert_eq!(review.sentiment, expected);
            assert!(!review.text.is_empty());
        }
    }

    #[test]
    fn confidence_and_timestamps_stay_in_range() {
        let now = fixed_now();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            for review in generate_reviews(&mut rng, now) {
                assert!((0.85..=0.99).contains(&review.confidence));
                let at = DateTime::parse_from_rfc3339(&review.timestamp)
                    .unwrap()
                    .with_timezone(&Utc);
                assert!(at <= now);
                assert!(now - at < Duration::hours(24));
            }
        }
    }

    #[test]
    fn same_seed_gives_same_pool() {
        let now = fixed_now();
        let first = generate_reviews(&mut StdRng::seed_from_u64(3), now);
        let second = generate_reviews(&mut StdRng::seed_from_u64(3), now);
        assert_eq!(first, second);
    }

    #[test]
    fn chart_data_joins_curves_by_epoch() {
        let progress = training_progress();
        assert_eq!(progress.total_epochs, 30);
        assert_eq!(progress.current_epoch, 30);
        assert!(!progress.is_training);
        assert_eq!(progress.train_accuracy.len(), 30);
        assert_eq!(progress.chart_data.len(), 30);
        for (index, point) in progress.chart_data.iter().enumerate() {
            assert_eq!(point.epoch, index as u32 + 1);
            assert_eq!(point.training, TRAIN_ACCURACY[index]);
            assert_eq!(point.validation, VALIDATION_ACCURACY[index]);
        }
        assert_eq!(progress.chart_data[29].test, 0.88);
    }

    #[test]
    fn timestamps_use_millisecond_utc_format() {
        assert_eq!(iso_timestamp(fixed_now()), "2026-02-02T12:00:00.000Z");
    }
}
