// src/domain/score.rs

/// Severity bucket used to color the score badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBucket {
    Low,
    Mid,
    High,
}

impl ScoreBucket {
    /// Low is `score < 0.33`, Mid is the open interval `(0.33, 0.66)`,
    /// everything else (including exactly 0.33 and exactly 0.66) is High.
    pub fn from_score(score: f64) -> Self {
        if score < 0.33 {
            ScoreBucket::Low
        } else if score > 0.33 && score < 0.66 {
            ScoreBucket::Mid
        } else {
            ScoreBucket::High
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBucket::Low => "score-low",
            ScoreBucket::Mid => "score-mid",
            ScoreBucket::High => "score-high",
        }
    }
}

/// Score rendered as a percentage with two decimals, e.g. `0.5` -> `"50.00"`.
pub fn score_label(score: f64) -> String {
    format!("{:.2}", score * 100.0)
}
