//! Ad Analytics
//!
//! Records write-once events and produces filtered summaries and CSV
//! exports for the admin dashboard.

use std::sync::Arc;

use kernel::id::CategoryId;

use crate::domain::entity::analytics::{
    AdAnalyticsEvent, AdEventType, AnalyticsFilter, AnalyticsTotals,
};
use crate::domain::repository::AnalyticsRepository;
use crate::error::QuizResult;

/// Default number of recent events in the summary view
pub const DEFAULT_RECENT_LIMIT: i64 = 50;

/// CSV column order, matching the dashboard export
const CSV_HEADER: &str = "created_at,event_type,placement,source,category_id,session_id,metadata";

/// Event as reported by the player frontend
pub struct RecordEventInput {
    pub event_type: AdEventType,
    pub placement: String,
    pub source: Option<String>,
    pub category_id: Option<String>,
    pub session_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Filtered summary for the admin view
pub struct AnalyticsSummary {
    pub totals: AnalyticsTotals,
    pub recent: Vec<AdAnalyticsEvent>,
}

/// Analytics use case
pub struct AnalyticsUseCase<R>
where
    R: AnalyticsRepository,
{
    repo: Arc<R>,
}

impl<R> AnalyticsUseCase<R>
where
    R: AnalyticsRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Record one event
    pub async fn record(&self, input: RecordEventInput) -> QuizResult<AdAnalyticsEvent> {
        let event = AdAnalyticsEvent::new(
            input.event_type,
            input.placement,
            input.source,
            input.category_id.map(CategoryId::from_string),
            input.session_id,
            input.metadata,
        );

        self.repo.insert_event(&event).await?;
        Ok(event)
    }

    /// Aggregate totals plus the most recent events passing the filter
    pub async fn summary(
        &self,
        filter: &AnalyticsFilter,
        limit: Option<i64>,
    ) -> QuizResult<AnalyticsSummary> {
        let totals = self.repo.count_events(filter).await?;
        let recent = self
            .repo
            .list_events(filter, limit.unwrap_or(DEFAULT_RECENT_LIMIT))
            .await?;

        Ok(AnalyticsSummary { totals, recent })
    }

    /// Render the full filtered event set as CSV, newest first
    pub async fn export_csv(&self, filter: &AnalyticsFilter) -> QuizResult<String> {
        let events = self.repo.list_events(filter, i64::MAX).await?;

        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        for event in events {
            out.push_str(&csv_row(&event));
            out.push('\n');
        }
        Ok(out)
    }
}

/// Render one event as a CSV row
fn csv_row(event: &AdAnalyticsEvent) -> String {
    let metadata = event
        .metadata
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_default();

    [
        event.created_at.to_rfc3339(),
        event.event_type.to_string(),
        event.placement.clone(),
        event.source.clone().unwrap_or_default(),
        event
            .category_id
            .as_ref()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default(),
        event.session_id.clone().unwrap_or_default(),
        metadata,
    ]
    .into_iter()
    .map(|field| csv_escape(&field))
    .collect::<Vec<_>>()
    .join(",")
}

/// Quote a field when it contains a delimiter, quote, or newline
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_escape_plain() {
        assert_eq!(csv_escape("between-questions"), "between-questions");
    }

    #[test]
    fn test_csv_escape_delimiters() {
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_csv_row_shape() {
        let event = AdAnalyticsEvent::new(
            AdEventType::Start,
            "header".to_string(),
            Some("quiz".to_string()),
            Some(CategoryId::from_string("cat-1")),
            Some("sess-1".to_string()),
            Some(serde_json::json!({"coins": 100})),
        );

        let row = csv_row(&event);
        assert!(row.contains("start"));
        assert!(row.contains("header"));
        assert!(row.contains("cat-1"));
        // JSON metadata carries commas, so it must be quoted
        assert!(row.contains("\"{\"\"coins\"\":100}\""));
    }
}
