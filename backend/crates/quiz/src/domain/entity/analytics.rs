//! Ad Analytics Event Entity

use chrono::{DateTime, Utc};
use kernel::id::{AnalyticsEventId, CategoryId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rewarded-ad lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdEventType {
    Start,
    Complete,
    Error,
}

impl AdEventType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AdEventType::Start => "start",
            AdEventType::Complete => "complete",
            AdEventType::Error => "error",
        }
    }
}

impl FromStr for AdEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(AdEventType::Start),
            "complete" => Ok(AdEventType::Complete),
            "error" => Ok(AdEventType::Error),
            other => Err(format!("Unknown event type: {other}")),
        }
    }
}

impl fmt::Display for AdEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-once analytics event
#[derive(Debug, Clone)]
pub struct AdAnalyticsEvent {
    pub event_id: AnalyticsEventId,
    pub event_type: AdEventType,
    pub placement: String,
    pub source: Option<String>,
    pub category_id: Option<CategoryId>,
    pub session_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl AdAnalyticsEvent {
    pub fn new(
        event_type: AdEventType,
        placement: String,
        source: Option<String>,
        category_id: Option<CategoryId>,
        session_id: Option<String>,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            event_id: AnalyticsEventId::new(),
            event_type,
            placement,
            source,
            category_id,
            session_id,
            metadata,
            created_at: Utc::now(),
        }
    }
}

/// Filters accepted by the admin summary and CSV export
#[derive(Debug, Clone, Default)]
pub struct AnalyticsFilter {
    pub from_ts: Option<DateTime<Utc>>,
    pub to_ts: Option<DateTime<Utc>>,
    pub placement: Option<String>,
    pub category_id: Option<String>,
}

impl AnalyticsFilter {
    /// Whether an event passes the filter
    pub fn matches(&self, event: &AdAnalyticsEvent) -> bool {
        if let Some(from) = self.from_ts
            && event.created_at < from
        {
            return false;
        }
        if let Some(to) = self.to_ts
            && event.created_at > to
        {
            return false;
        }
        if let Some(placement) = &self.placement
            && event.placement != *placement
        {
            return false;
        }
        if let Some(category_id) = &self.category_id
            && event.category_id.as_ref().map(|id| id.as_str()) != Some(category_id.as_str())
        {
            return false;
        }
        true
    }
}

/// Aggregated counts over a filtered event set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalyticsTotals {
    pub total_events: i64,
    pub starts: i64,
    pub completes: i64,
    pub errors: i64,
}

impl AnalyticsTotals {
    /// complete/start ratio as a percentage, 0 when there are no starts
    pub fn conversion_rate(&self) -> f64 {
        if self.starts == 0 {
            0.0
        } else {
            (self.completes as f64 / self.starts as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_rate() {
        let totals = AnalyticsTotals {
            total_events: 10,
            starts: 8,
            completes: 2,
            errors: 0,
        };
        assert!((totals.conversion_rate() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_conversion_rate_no_starts() {
        let totals = AnalyticsTotals {
            total_events: 3,
            starts: 0,
            completes: 3,
            errors: 0,
        };
        assert_eq!(totals.conversion_rate(), 0.0);
    }

    #[test]
    fn test_filter_matches() {
        let event = AdAnalyticsEvent::new(
            AdEventType::Start,
            "between-questions".to_string(),
            None,
            Some(CategoryId::from_string("cat-1")),
            None,
            None,
        );

        assert!(AnalyticsFilter::default().matches(&event));
        assert!(
            AnalyticsFilter {
                placement: Some("between-questions".to_string()),
                ..Default::default()
            }
            .matches(&event)
        );
        assert!(
            !AnalyticsFilter {
                placement: Some("header".to_string()),
                ..Default::default()
            }
            .matches(&event)
        );
        assert!(
            !AnalyticsFilter {
                category_id: Some("cat-2".to_string()),
                ..Default::default()
            }
            .matches(&event)
        );
        assert!(
            !AnalyticsFilter {
                from_ts: Some(Utc::now() + chrono::Duration::hours(1)),
                ..Default::default()
            }
            .matches(&event)
        );
    }

    #[test]
    fn test_event_type_serde() {
        assert_eq!(
            serde_json::to_string(&AdEventType::Complete).unwrap(),
            "\"complete\""
        );
        let t: AdEventType = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(t, AdEventType::Error);
    }
}
