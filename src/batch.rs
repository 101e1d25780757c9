use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::models::Review;
use crate::service::ReviewApi;
use crate::session::ReviewWidget;

#[derive(Debug, Deserialize)]
struct CsvRow {
    text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum BatchOutcome {
    Classified(Review),
    Rejected { text: String, reason: String },
}

pub fn read_texts(csv_path: &Path) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut texts = Vec::new();

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("invalid row {} in CSV", line + 1))?;
        texts.push(row.text);
    }

    Ok(texts)
}

// Rows share one widget, cleared between rows, so they get the same
// validation and error mapping as interactive input.
pub async fn classify_all<A: ReviewApi + ?Sized>(api: &A, texts: Vec<String>) -> Vec<BatchOutcome> {
    let mut outcomes = Vec::with_capacity(texts.len());
    let mut widget = ReviewWidget::new();

    for text in texts {
        widget.clear();
        widget.set_text(text);
        widget.analyze(api).await;

        let outcome = match (widget.error(), widget.prediction()) {
            (None, Some(prediction)) => BatchOutcome::Classified(prediction.clone()),
            (error, _) => BatchOutcome::Rejected {
                text: widget.text().to_string(),
                reason: error.unwrap_or("no prediction").to_string(),
            },
        };
        outcomes.push(outcome);
    }

    tracing::info!(rows = outcomes.len(), "batch classification finished");
    outcomes
}
