//! Score summaries for a completed set.

use serde::{Deserialize, Serialize};

/// Grade bands shown with a set result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// Every answer correct.
    Perfect,
    /// 80% or better.
    Excellent,
    /// 60% or better.
    Good,
    KeepGoing,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            100.. => Grade::Perfect,
            80..=99 => Grade::Excellent,
            60..=79 => Grade::Good,
            _ => Grade::KeepGoing,
        }
    }

    /// Encouragement line for the results screen.
    pub fn message(&self) -> &'static str {
        match self {
            Grade::Perfect => "Perfect! Every answer was correct!",
            Grade::Excellent => "Excellent! Almost there!",
            Grade::Good => "Good pace! Keep it up!",
            Grade::KeepGoing => "Keep going! You'll do better next time!",
        }
    }
}

/// Score, percentage and grade of a completed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSummary {
    pub score: u32,
    pub total_questions: u32,
    /// Rounded to the nearest whole percent; 0 for an empty set.
    pub percentage: u32,
    pub grade: Grade,
}

impl SetSummary {
    pub fn new(score: u32, total_questions: u32) -> Self {
        let percentage = if total_questions == 0 {
            0
        } else {
            (f64::from(score) / f64::from(total_questions) * 100.0).round() as u32
        };
        Self {
            score,
            total_questions,
            percentage,
            grade: Grade::from_percentage(percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(SetSummary::new(2, 3).percentage, 67);
        assert_eq!(SetSummary::new(1, 3).percentage, 33);
        assert_eq!(SetSummary::new(0, 0).percentage, 0);
    }

    #[test]
    fn grade_bands() {
        assert_eq!(SetSummary::new(10, 10).grade, Grade::Perfect);
        assert_eq!(SetSummary::new(8, 10).grade, Grade::Excellent);
        assert_eq!(SetSummary::new(6, 10).grade, Grade::Good);
        assert_eq!(SetSummary::new(5, 10).grade, Grade::KeepGoing);
        assert_eq!(SetSummary::new(0, 0).grade, Grade::KeepGoing);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(SetSummary::new(1, 8).percentage, 13);
    }
}
