//! Shared types for loghub
//!
//! This crate contains the data model exchanged with the LogHub API and the
//! pure helpers (query construction, pagination window, display formatting)
//! used across the other loghub crates.

use std::borrow::Cow;

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

// ============================================================================
// Severity Levels
// ============================================================================

/// Log severity level as defined by the LogHub wire format.
///
/// The enum is closed: the display mappings below are exhaustive matches, so
/// a new severity cannot be added without also giving it a color and label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// All levels in ascending severity order, for cycling in the filter form.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Parse a level from user input. Accepts any casing.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Some(Self::Trace),
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARN" => Some(Self::Warn),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    /// Wire/display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Display color for the severity badge.
    pub fn color(&self) -> Color {
        match self {
            Self::Trace => Color::DarkGray,
            Self::Debug => Color::Cyan,
            Self::Info => Color::Green,
            Self::Warn => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

// ============================================================================
// Log Events
// ============================================================================

/// Client SDK that emitted a log event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SdkInfo {
    pub language: String,
    pub version: String,
}

/// One ingested log record as returned by the API.
///
/// The timestamp is kept as the raw wire string: an unparsable value must
/// still render (as-is) instead of failing the whole page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub application: String,

    pub environment: String,

    pub level: LogLevel,

    pub message: String,

    /// ISO-8601 instant, verbatim from the server.
    pub timestamp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,

    /// Open mapping of string keys to arbitrary JSON values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk: Option<SdkInfo>,
}

impl LogEvent {
    /// Parse the wire timestamp, if it is a valid RFC 3339 instant.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Local-time display string with second precision. Falls back to the
    /// raw value when the timestamp does not parse.
    pub fn format_timestamp(&self) -> String {
        match self.parsed_timestamp() {
            Some(ts) => ts
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            None => self.timestamp.clone(),
        }
    }

    /// Local-time display string with millisecond precision (detail view).
    pub fn format_timestamp_millis(&self) -> String {
        match self.parsed_timestamp() {
            Some(ts) => ts
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S%.3f")
                .to_string(),
            None => self.timestamp.clone(),
        }
    }
}

// ============================================================================
// Filters
// ============================================================================

/// User query intent. Empty string / `None` means "not filtered".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogFilters {
    pub application: String,
    pub environment: String,
    pub level: Option<LogLevel>,
    /// Local wall-clock lower bound, `YYYY-MM-DDTHH:MM[:SS]`.
    pub from: String,
    /// Local wall-clock upper bound, `YYYY-MM-DDTHH:MM[:SS]`.
    pub to: String,
}

impl LogFilters {
    pub fn is_empty(&self) -> bool {
        self.application.is_empty()
            && self.environment.is_empty()
            && self.level.is_none()
            && self.from.is_empty()
            && self.to.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Query parameters for the list endpoint: exactly the non-empty fields.
    /// `from`/`to` are converted from local wall-clock input to absolute
    /// UTC instants before transmission.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.application.is_empty() {
            params.push(("application", self.application.clone()));
        }
        if !self.environment.is_empty() {
            params.push(("environment", self.environment.clone()));
        }
        if let Some(level) = self.level {
            params.push(("level", level.as_str().to_string()));
        }
        if !self.from.is_empty() {
            params.push(("from", local_to_instant(&self.from)));
        }
        if !self.to.is_empty() {
            params.push(("to", local_to_instant(&self.to)));
        }
        params
    }
}

/// Convert a local wall-clock datetime string to an RFC 3339 UTC instant.
///
/// Input that does not parse as a local datetime is passed through unchanged;
/// the server is the validator of last resort.
fn local_to_instant(input: &str) -> String {
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"));

    match naive
        .ok()
        .and_then(|n| Local.from_local_datetime(&n).earliest())
    {
        Some(local) => local
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        None => input.to_string(),
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Server pagination envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Ordered events for this page. `content.len() <= size`.
    pub content: Vec<T>,
    /// Zero-based page index.
    pub page: u64,
    /// Page capacity.
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

/// Page indices to offer as buttons: a window of at most five pages,
/// centered on the current page except near the edges.
pub fn page_window(page: u64, total_pages: u64) -> Vec<u64> {
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= 5 {
        (0..total_pages).collect()
    } else if page < 3 {
        (0..5).collect()
    } else if page > total_pages - 4 {
        (total_pages - 5..total_pages).collect()
    } else {
        (page - 2..=page + 2).collect()
    }
}

// ============================================================================
// Display helpers
// ============================================================================

/// Display-only truncation to `max_chars` characters with an ellipsis marker.
/// Operates on character boundaries, never mid-codepoint.
pub fn truncate_message(message: &str, max_chars: usize) -> Cow<'_, str> {
    match message.char_indices().nth(max_chars) {
        Some((idx, _)) => Cow::Owned(format!("{}...", &message[..idx])),
        None => Cow::Borrowed(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(message: &str) -> LogEvent {
        LogEvent {
            id: Some("abc".to_string()),
            application: "billing".to_string(),
            environment: "production".to_string(),
            level: LogLevel::Info,
            message: message.to_string(),
            timestamp: "2024-03-10T12:00:00.000Z".to_string(),
            trace_id: None,
            metadata: None,
            sdk: None,
        }
    }

    #[test]
    fn level_serde_uses_uppercase_wire_names() {
        let json = serde_json::to_string(&LogLevel::Warn).unwrap();
        assert_eq!(json, "\"WARN\"");

        let level: LogLevel = serde_json::from_str("\"ERROR\"").unwrap();
        assert_eq!(level, LogLevel::Error);

        // Closed enum: unknown severities are rejected, not coerced.
        assert!(serde_json::from_str::<LogLevel>("\"FATAL\"").is_err());
    }

    #[test]
    fn level_parse_accepts_any_casing() {
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("Trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn log_event_deserializes_without_optional_fields() {
        let json = r#"{
            "application": "billing",
            "environment": "staging",
            "level": "DEBUG",
            "message": "hello",
            "timestamp": "2024-03-10T12:00:00Z"
        }"#;

        let event: LogEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, None);
        assert_eq!(event.trace_id, None);
        assert!(event.metadata.is_none());
        assert!(event.sdk.is_none());
        assert_eq!(event.level, LogLevel::Debug);
    }

    #[test]
    fn log_event_deserializes_nested_optional_fields() {
        let json = r#"{
            "id": "e-1",
            "application": "billing",
            "environment": "production",
            "level": "ERROR",
            "message": "boom",
            "timestamp": "2024-03-10T12:00:00Z",
            "traceId": "trace-42",
            "metadata": {"userId": 7, "tags": ["a", "b"]},
            "sdk": {"language": "java", "version": "1.4.0"}
        }"#;

        let event: LogEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.trace_id.as_deref(), Some("trace-42"));
        let metadata = event.metadata.unwrap();
        assert_eq!(metadata["userId"], serde_json::json!(7));
        let sdk = event.sdk.unwrap();
        assert_eq!(sdk.language, "java");
        assert_eq!(sdk.version, "1.4.0");
    }

    #[test]
    fn unparsable_timestamp_falls_back_to_raw() {
        let mut e = event("x");
        e.timestamp = "not-a-timestamp".to_string();
        assert_eq!(e.parsed_timestamp(), None);
        assert_eq!(e.format_timestamp(), "not-a-timestamp");
        assert_eq!(e.format_timestamp_millis(), "not-a-timestamp");
    }

    #[test]
    fn query_params_include_exactly_non_empty_fields() {
        let filters = LogFilters::default();
        assert!(filters.is_empty());
        assert!(filters.to_query_params().is_empty());

        let filters = LogFilters {
            application: "billing".to_string(),
            level: Some(LogLevel::Error),
            ..Default::default()
        };
        let params = filters.to_query_params();
        assert_eq!(
            params,
            vec![
                ("application", "billing".to_string()),
                ("level", "ERROR".to_string()),
            ]
        );
    }

    #[test]
    fn time_bounds_are_emitted_as_utc_instants() {
        let filters = LogFilters {
            from: "2024-03-10T12:00".to_string(),
            to: "2024-03-11T08:30:15".to_string(),
            ..Default::default()
        };

        let params = filters.to_query_params();
        assert_eq!(params.len(), 2);

        for (_, value) in &params {
            // Absolute instant, not the local wall-clock input.
            let parsed = DateTime::parse_from_rfc3339(value).unwrap();
            assert!(value.ends_with('Z'));

            // Round trip back to local wall-clock matches the input minute.
            let local = parsed.with_timezone(&Local);
            let rendered = local.format("%Y-%m-%dT%H:%M").to_string();
            assert!(
                rendered == "2024-03-10T12:00" || rendered == "2024-03-11T08:30",
                "unexpected round trip: {rendered}"
            );
        }
    }

    #[test]
    fn invalid_time_bound_passes_through_unchanged() {
        let filters = LogFilters {
            from: "yesterday".to_string(),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query_params(),
            vec![("from", "yesterday".to_string())]
        );
    }

    #[test]
    fn page_window_stays_within_bounds() {
        assert!(page_window(0, 0).is_empty());
        assert_eq!(page_window(0, 1), vec![0]);
        assert_eq!(page_window(2, 5), vec![0, 1, 2, 3, 4]);

        for total in 1..30u64 {
            for page in 0..total {
                let window = page_window(page, total);
                assert!(window.len() <= 5);
                assert!(window.iter().all(|&p| p < total));
                if page >= 3 && page <= total.saturating_sub(4) {
                    assert!(window.contains(&page));
                }
            }
        }
    }

    #[test]
    fn page_window_centers_except_near_edges() {
        assert_eq!(page_window(0, 10), vec![0, 1, 2, 3, 4]);
        assert_eq!(page_window(2, 10), vec![0, 1, 2, 3, 4]);
        assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
        // totalPages=10, page=7: last five pages.
        assert_eq!(page_window(7, 10), vec![5, 6, 7, 8, 9]);
        assert_eq!(page_window(9, 10), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn truncation_is_display_only() {
        let short = "all good";
        assert_eq!(truncate_message(short, 80), short);

        let long = "x".repeat(81);
        let shown = truncate_message(&long, 80);
        assert_eq!(shown.chars().count(), 83);
        assert!(shown.ends_with("..."));
        // The original stays untouched for the detail view.
        assert_eq!(long.len(), 81);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let msg = "é".repeat(100);
        let shown = truncate_message(&msg, 80);
        assert_eq!(shown.chars().count(), 83);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn page_response_deserializes_camel_case() {
        let json = r#"{
            "content": [],
            "page": 0,
            "size": 20,
            "totalElements": 0,
            "totalPages": 0
        }"#;

        let page: PageResponse<LogEvent> = serde_json::from_str(json).unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
    }
}
