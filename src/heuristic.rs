use crate::models::Sentiment;

pub const POSITIVE_KEYWORDS: [&str; 8] = [
    "good",
    "great",
    "excellent",
    "amazing",
    "fantastic",
    "love",
    "best",
    "wonderful",
];

pub const NEGATIVE_KEYWORDS: [&str; 7] = [
    "bad",
    "terrible",
    "awful",
    "worst",
    "hate",
    "disappointing",
    "poor",
];

// Each keyword counts once and matches anywhere inside a word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTally {
    pub positive: Vec<&'static str>,
    pub negative: Vec<&'static str>,
}

impl KeywordTally {
    pub fn positive_count(&self) -> usize {
        self.positive.len()
    }

    pub fn negative_count(&self) -> usize {
        self.negative.len()
    }

    // Equal counts resolve to Negative.
    pub fn sentiment(&self) -> Sentiment {
        if self.positive_count() > self.negative_count() {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }
}

pub fn tally_keywords(text: &str) -> KeywordTally {
    let lowered = text.to_lowercase();
    KeywordTally {
        positive: matched(&lowered, &POSITIVE_KEYWORDS),
        negative: matched(&lowered, &NEGATIVE_KEYWORDS),
    }
}

fn matched(lowered: &str, keywords: &[&'static str]) -> Vec<&'static str> {
    keywords
        .iter()
        .copied()
        .filter(|keyword| lowered.contains(keyword))
        .collect()
}
