//! Quiz Question Entity

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, QuestionId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Difficulty
// ============================================================================

/// Question difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("Unknown difficulty: {other}")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Question type
// ============================================================================

/// Interactive question format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    ThisOrThat,
    EmojiDecode,
    Personality,
    Prediction,
}

impl Default for QuestionType {
    fn default() -> Self {
        QuestionType::MultipleChoice
    }
}

impl QuestionType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::ThisOrThat => "this_or_that",
            QuestionType::EmojiDecode => "emoji_decode",
            QuestionType::Personality => "personality",
            QuestionType::Prediction => "prediction",
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "this_or_that" => Ok(QuestionType::ThisOrThat),
            "emoji_decode" => Ok(QuestionType::EmojiDecode),
            "personality" => Ok(QuestionType::Personality),
            "prediction" => Ok(QuestionType::Prediction),
            other => Err(format!("Unknown question type: {other}")),
        }
    }
}

// ============================================================================
// Correct answer
// ============================================================================

/// The answer contract of a question
///
/// Personality/prediction-style questions have no correct option; that case
/// is a variant, not a magic index. The wire format stays an integer: the
/// option index for graded questions, `-1` for ungraded ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectAnswer {
    /// A single option at `index` is correct
    Graded { index: usize },
    /// No correct answer (personality/prediction formats)
    Ungraded,
}

impl CorrectAnswer {
    /// Wire/database sentinel for `Ungraded`
    const UNGRADED_SENTINEL: i32 = -1;

    /// Whether the answer refers to a valid option
    pub fn is_valid_for(&self, options_len: usize) -> bool {
        match self {
            CorrectAnswer::Graded { index } => *index < options_len,
            CorrectAnswer::Ungraded => true,
        }
    }

    /// Integer wire/database representation
    pub fn to_db(&self) -> i32 {
        match self {
            CorrectAnswer::Graded { index } => *index as i32,
            CorrectAnswer::Ungraded => Self::UNGRADED_SENTINEL,
        }
    }

    /// Parse the integer representation
    pub fn from_db(value: i32) -> Result<Self, String> {
        if value == Self::UNGRADED_SENTINEL {
            Ok(CorrectAnswer::Ungraded)
        } else if value >= 0 {
            Ok(CorrectAnswer::Graded {
                index: value as usize,
            })
        } else {
            Err(format!("Invalid correct_answer value: {value}"))
        }
    }
}

impl Serialize for CorrectAnswer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.to_db())
    }
}

impl<'de> Deserialize<'de> for CorrectAnswer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i32::deserialize(deserializer)?;
        CorrectAnswer::from_db(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Question entity
// ============================================================================

/// Quiz question entity
///
/// Invariants (enforced at the DTO boundary):
/// - at least 2 options
/// - a graded answer indexes into `options`
#[derive(Debug, Clone)]
pub struct QuizQuestion {
    pub question_id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub fun_fact: String,
    pub category_id: CategoryId,
    pub subcategory: String,
    // Interactive format specific fields
    pub emoji_clue: Option<String>,
    pub visual_options: Option<Vec<String>>,
    pub personality_trait: Option<String>,
    pub prediction_year: Option<String>,
    pub engagement_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuizQuestion {
    /// Bump the updated timestamp after a mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_answer_graded_round_trip() {
        let answer = CorrectAnswer::from_db(2).unwrap();
        assert_eq!(answer, CorrectAnswer::Graded { index: 2 });
        assert_eq!(answer.to_db(), 2);
    }

    #[test]
    fn test_correct_answer_ungraded_sentinel() {
        let answer = CorrectAnswer::from_db(-1).unwrap();
        assert_eq!(answer, CorrectAnswer::Ungraded);
        assert_eq!(answer.to_db(), -1);
    }

    #[test]
    fn test_correct_answer_rejects_other_negatives() {
        assert!(CorrectAnswer::from_db(-2).is_err());
    }

    #[test]
    fn test_correct_answer_validity() {
        assert!(CorrectAnswer::Graded { index: 1 }.is_valid_for(2));
        assert!(!CorrectAnswer::Graded { index: 2 }.is_valid_for(2));
        assert!(CorrectAnswer::Ungraded.is_valid_for(2));
    }

    #[test]
    fn test_correct_answer_serde() {
        let json = serde_json::to_string(&CorrectAnswer::Graded { index: 3 }).unwrap();
        assert_eq!(json, "3");

        let back: CorrectAnswer = serde_json::from_str("-1").unwrap();
        assert_eq!(back, CorrectAnswer::Ungraded);

        let err: Result<CorrectAnswer, _> = serde_json::from_str("-5");
        assert!(err.is_err());
    }

    #[test]
    fn test_difficulty_serde() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Beginner).unwrap(),
            "\"beginner\""
        );
        let d: Difficulty = serde_json::from_str("\"advanced\"").unwrap();
        assert_eq!(d, Difficulty::Advanced);
    }

    #[test]
    fn test_question_type_serde() {
        assert_eq!(
            serde_json::to_string(&QuestionType::EmojiDecode).unwrap(),
            "\"emoji_decode\""
        );
        let t: QuestionType = serde_json::from_str("\"this_or_that\"").unwrap();
        assert_eq!(t, QuestionType::ThisOrThat);
    }
}
