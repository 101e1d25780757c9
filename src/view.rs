use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::heuristic;
use crate::mock;
use crate::models::{ChartPoint, ModelMetrics, Review, TrainingProgress};
use crate::session::{Dashboard, Detail, ReviewWidget};

const BAR_WIDTH: usize = 24;
const HISTORY_EPOCHS: usize = 10;
const EXCERPT_CHARS: usize = 72;

pub fn percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

pub fn format_loss(loss: f64) -> String {
    format!("{loss:.4}")
}

pub fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn relative_age(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(at) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let at = at.with_timezone(&Utc);
    let elapsed = now - at;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}

fn badge(review: &Review) -> String {
    let mark = if review.sentiment.is_positive() { "+" } else { "-" };
    format!("[{mark} {}]", review.sentiment)
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS - 3).collect();
    format!("{}...", cut.trim_end())
}

fn write_confidence(output: &mut String, confidence: f64) {
    let _ = writeln!(
        output,
        "  Confidence {} {}",
        bar(confidence, BAR_WIDTH),
        percent(confidence, 1)
    );
}

pub fn render_gallery(reviews: &[Review], now: DateTime<Utc>) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## Sample Reviews");

    if reviews.is_empty() {
        let _ = writeln!(output, "No reviews available.");
        return output;
    }

    for review in reviews {
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "#{} {} {}",
            review.id,
            badge(review),
            relative_age(&review.timestamp, now)
        );
        let _ = writeln!(output, "  {}", excerpt(&review.text));
        write_confidence(&mut output, review.confidence);
    }

    output
}

pub fn render_detail(detail: &Detail) -> String {
    let review = &detail.review;
    let mut output = String::new();

    if let Some(notice) = &detail.notice {
        let _ = writeln!(output, "! {notice}; showing review #{} instead", review.id);
        let _ = writeln!(output);
    }

    let _ = writeln!(output, "## Review #{} {}", review.id, badge(review));
    let _ = writeln!(output, "{}", review.text);
    let _ = writeln!(output);
    write_confidence(&mut output, review.confidence);
    let _ = writeln!(
        output,
        "The model is {} confident that this review expresses a {} sentiment.",
        percent(review.confidence, 1),
        review.sentiment.to_string().to_lowercase()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "Recorded at {}", review.timestamp);

    output
}

pub fn render_metrics(metrics: &ModelMetrics) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## Model Performance");
    let _ = writeln!(
        output,
        "- Test Accuracy: {} (model performance on test set)",
        percent(metrics.accuracy, 2)
    );
    let _ = writeln!(
        output,
        "- Loss: {} (binary cross-entropy loss)",
        format_loss(metrics.loss)
    );
    let _ = writeln!(
        output,
        "- Epochs Trained: {} (training iterations completed)",
        metrics.epoch
    );
    output
}

pub fn render_training_history(progress: &TrainingProgress) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## Training History");
    let _ = writeln!(
        output,
        "Accuracy progression over {} epochs",
        progress.total_epochs
    );

    let skip = progress.train_accuracy.len().saturating_sub(HISTORY_EPOCHS);
    for (offset, accuracy) in progress.train_accuracy.iter().skip(skip).enumerate() {
        let epoch = skip + offset + 1;
        let _ = writeln!(
            output,
            "Epoch {:>3} {} {}",
            epoch,
            bar(*accuracy, BAR_WIDTH),
            percent(*accuracy, 1)
        );
    }

    if let Some(last) = progress.chart_data.last() {
        let _ = writeln!(
            output,
            "Final validation accuracy: {}",
            percent(last.validation, 1)
        );
    }
    let _ = writeln!(
        output,
        "Final test accuracy: {}",
        percent(progress.test_accuracy, 2)
    );

    output
}

pub fn render_architecture() -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## Model Architecture");
    for (label, value) in mock::ARCHITECTURE {
        let _ = writeln!(output, "- {label}: {value}");
    }
    output
}

pub fn render_chart_data(chart_data: &[ChartPoint]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## Training, Validation, and Test Accuracy");
    let _ = writeln!(
        output,
        "{:>5}  {:>8}  {:>10}  {:>6}",
        "Epoch",
        "Training",
        "Validation",
        "Test"
    );

    for point in chart_data {
        let _ = writeln!(
            output,
            "{:>5}  {:>8}  {:>10}  {:>6}",
            point.epoch,
            percent(point.training, 1),
            percent(point.validation, 1),
            percent(point.test, 1)
        );
    }
    output
}

pub fn render_prediction(review: &Review) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{} Sentiment Detected", review.sentiment);
    write_confidence(&mut output, review.confidence);

    let tally = heuristic::tally_keywords(&review.text);
    if tally.positive.is_empty() && tally.negative.is_empty() {
        let _ = writeln!(output, "  No sentiment keywords found.");
    } else {
        let _ = writeln!(
            output,
            "  Keywords: positive [{}], negative [{}]",
            tally.positive.join(", "),
            tally.negative.join(", ")
        );
    }
    output
}

pub fn render_widget(widget: &ReviewWidget) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "> {}", widget.text());
    let _ = writeln!(output, "  {} characters", widget.char_count());

    if let Some(error) = widget.error() {
        let _ = writeln!(output, "! {error}");
    } else if let Some(prediction) = widget.prediction() {
        output.push_str(&render_prediction(prediction));
    }
    output
}

pub fn render_home(dashboard: &Dashboard, now: DateTime<Utc>) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Movie Review Sentiment Analysis");
    let _ = writeln!(
        output,
        "LSTM-based sentiment model trained on the IMDB dataset."
    );

    let _ = writeln!(output);
    match &dashboard.metrics {
        Some(metrics) => output.push_str(&render_metrics(metrics)),
        None => {
            let _ = writeln!(output, "Model metrics are unavailable.");
        }
    }

    let _ = writeln!(output);
    match &dashboard.progress {
        Some(progress) => output.push_str(&render_chart_data(&progress.chart_data)),
        None => {
            let _ = writeln!(output, "Training history is unavailable.");
        }
    }

    let _ = writeln!(output);
    output.push_str(&render_gallery(&dashboard.reviews, now));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;
    use crate::service::{Latency, SentimentService};
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-02-02T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn review_at(ago: Duration, sentiment: Sentiment) -> Review {
        Review {
            id: 3,
            text: "One of the best films I've seen this year.".to_string(),
            sentiment,
            confidence: 0.934,
            timestamp: mock::iso_timestamp(now() - ago),
        }
    }

    #[test]
    fn formats_percentages_and_loss() {
        assert_eq!(percent(0.934, 1), "93.4%");
        assert_eq!(percent(0.88, 2), "88.00%");
        assert_eq!(format_loss(0.32), "0.3200");
    }

    #[test]
    fn bar_is_proportional_and_clamped() {
        assert_eq!(bar(0.5, 4), "██░░");
        assert_eq!(bar(1.7, 3), "███");
        assert_eq!(bar(-1.0, 2), "░░");
    }

    #[test]
    fn relative_age_tiers() {
        let at = |ago| mock::iso_timestamp(now() - ago);
        assert_eq!(relative_age(&at(Duration::seconds(20)), now()), "Just now");
        assert_eq!(relative_age(&at(Duration::minutes(12)), now()), "12m ago");
        assert_eq!(relative_age(&at(Duration::hours(5)), now()), "5h ago");
        assert_eq!(relative_age(&at(Duration::hours(30)), now()), "2026-02-01");
        assert_eq!(relative_age("not a date", now()), "not a date");
    }

    #[test]
    fn gallery_lists_badges_and_confidence() {
        let reviews = vec![review_at(Duration::minutes(3), Sentiment::Positive)];
        let rendered = render_gallery(&reviews, now());
        assert!(rendered.contains("#3 [+ Positive] 3m ago"));
        assert!(rendered.contains("93.4%"));
        assert!(render_gallery(&[], now()).contains("No reviews available."));
    }

    #[test]
    fn detail_explains_fallback() {
        let detail = Detail {
            review: review_at(Duration::hours(1), Sentiment::Negative),
            notice: Some("Review not found".to_string()),
        };
        let rendered = render_detail(&detail);
        assert!(rendered.starts_with("! Review not found; showing review #3 instead"));
        assert!(rendered.contains("expresses a negative sentiment"));
    }

    #[test]
    fn training_history_shows_last_ten_epochs() {
        let rendered = render_training_history(&mock::training_progress());
        assert!(rendered.contains("over 30 epochs"));
        assert!(rendered.contains("Epoch  21"));
        assert!(rendered.contains("Epoch  30"));
        assert!(!rendered.contains("Epoch  20"));
        assert!(rendered.contains("Final test accuracy: 88.00%"));
    }

    #[test]
    fn prediction_lists_matched_keywords() {
        let review = Review {
            id: 1,
            text: "Great cast, awful script, wonderful score".to_string(),
            sentiment: Sentiment::Positive,
            confidence: 0.8,
            timestamp: mock::iso_timestamp(now()),
        };
        let rendered = render_prediction(&review);
        assert!(rendered.starts_with("Positive Sentiment Detected"));
        assert!(rendered.contains("positive [great, wonderful], negative [awful]"));
    }

    #[test]
    fn home_degrades_missing_slots() {
        let dashboard = Dashboard {
            reviews: Vec::new(),
            metrics: Some(mock::model_metrics()),
            progress: None,
        };
        let rendered = render_home(&dashboard, now());
        assert!(rendered.contains("Test Accuracy: 88.00%"));
        assert!(rendered.contains("Training history is unavailable."));
        assert!(rendered.contains("No reviews available."));
    }

    fn row_cells(rendered: &str, first: &str) -> Vec<String> {
        for line in rendered.lines() {
            let cells: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            if cells.first().map(String::as_str) == Some(first) {
                return cells;
            }
        }
        Vec::new()
    }

    #[test]
    fn chart_table_lists_every_epoch_with_all_three_curves() {
        let progress = mock::training_progress();
        let rendered = render_chart_data(&progress.chart_data);
        assert!(rendered.starts_with("## Training, Validation, and Test Accuracy"));
        assert_eq!(
            row_cells(&rendered, "Epoch"),
            ["Epoch", "Training", "Validation", "Test"]
        );
        assert_eq!(row_cells(&rendered, "1"), ["1", "80.0%", "76.0%", "88.0%"]);
        assert_eq!(
            row_cells(&rendered, "30"),
            ["30", "100.0%", "86.0%", "88.0%"]
        );
        assert_eq!(rendered.lines().count(), 32);
    }

    #[test]
    fn home_renders_chart_data() {
        let dashboard = Dashboard {
            reviews: Vec::new(),
            metrics: None,
            progress: Some(mock::training_progress()),
        };
        let rendered = render_home(&dashboard, now());
        assert!(rendered.contains("Model metrics are unavailable."));
        assert_eq!(
            row_cells(&rendered, "21"),
            ["21", "100.0%", "88.0%", "88.0%"]
        );
    }

    #[test]
    fn architecture_lists_model_shape() {
        let rendered = render_architecture();
        assert!(rendered.contains("- Model Type: LSTM (Long Short-Term Memory)"));
        assert!(rendered.contains("- Vocabulary Size: 50,000 words"));
        assert!(rendered.contains("- Sequence Length: 500 tokens"));
        assert!(rendered.contains("- Embedding Dimension: 128"));
        assert!(rendered.contains("- LSTM Units: 64"));
        assert!(rendered.contains("- Activation: Sigmoid (Binary Classification)"));
    }

    #[tokio::test]
    async fn widget_renders_result_once_analysis_returns() {
        let service = SentimentService::seeded(5, Latency::instant());
        let mut widget = ReviewWidget::new();
        widget.set_text("Best sequel ever");
        widget.analyze(&service).await;

        let rendered = render_widget(&widget);
        assert!(rendered.contains("16 characters"));
        assert!(rendered.contains("Positive Sentiment Detected"));
        assert!(!rendered.contains("Analyzing"));

        widget.set_text("meh");
        widget.analyze(&service).await;
        let rendered = render_widget(&widget);
        assert!(rendered.contains("! Review must be at least 5 characters long"));
        assert!(!rendered.contains("Sentiment Detected"));
    }
}
