//! Quiz Category Entity

use chrono::{DateTime, Utc};
use kernel::id::CategoryId;
use serde::{Deserialize, Serialize};

/// Per-category question timer settings
///
/// Fields default on deserialization too, so older exports without timer
/// data import cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_true")]
    pub timer_enabled: bool,
    #[serde(default = "default_timer_seconds")]
    pub timer_seconds: i32,
    #[serde(default = "default_true")]
    pub show_timer_warning: bool,
    #[serde(default = "default_true")]
    pub auto_advance_on_timeout: bool,
    #[serde(default = "default_true")]
    pub show_correct_answer_on_timeout: bool,
}

fn default_true() -> bool {
    true
}

fn default_timer_seconds() -> i32 {
    30
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            timer_enabled: true,
            timer_seconds: default_timer_seconds(),
            show_timer_warning: true,
            auto_advance_on_timeout: true,
            show_correct_answer_on_timeout: true,
        }
    }
}

/// Quiz category entity
///
/// Invariant: `entry_fee` and `prize_pool` are non-negative (enforced at the
/// DTO boundary).
#[derive(Debug, Clone)]
pub struct QuizCategory {
    pub category_id: CategoryId,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: String,
    pub subcategories: Vec<String>,
    pub entry_fee: i64,
    pub prize_pool: i64,
    pub timer: TimerSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuizCategory {
    /// Bump the updated timestamp after a mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
