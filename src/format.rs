//! Content negotiation and truth response bodies.

use serde::Serialize;

use crate::store::{TruthRecord, WeightTier};

/// Negotiated representation for truth endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    PlainText,
}

/// Picks the response format from the Accept header value.
///
/// JSON is the default; plain text must be asked for explicitly. An absent
/// or unparseable header negotiates JSON.
pub fn negotiate(accept: Option<&str>) -> ResponseFormat {
    match accept {
        Some(value) if value.contains("text/plain") => ResponseFormat::PlainText,
        _ => ResponseFormat::Json,
    }
}

/// Structured JSON body for a selected truth.
///
/// `day` reflects the server's current weekday at response time; it is not
/// stored on the record.
#[derive(Debug, Clone, Serialize)]
pub struct TruthReply {
    pub truth: String,
    pub category: String,
    pub day: &'static str,
    pub weight: WeightTier,
    pub id: String,
}

impl TruthReply {
    pub fn new(record: &TruthRecord, day: &'static str) -> Self {
        Self {
            truth: record.text.clone(),
            category: record.category.clone(),
            day,
            weight: record.weight,
            id: record.id.clone(),
        }
    }
}

/// Plain-text rendering: the record text exactly, with no wrapping.
pub fn plain_body(record: &TruthRecord) -> String {
    record.text.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TruthRecord {
        TruthRecord {
            id: "truth-021".to_string(),
            text: "The smallest change can cause the biggest outage.".to_string(),
            category: "risk".to_string(),
            weight: WeightTier::High,
        }
    }

    #[test]
    fn test_json_is_the_default() {
        assert_eq!(negotiate(None), ResponseFormat::Json);
        assert_eq!(negotiate(Some("application/json")), ResponseFormat::Json);
        assert_eq!(negotiate(Some("*/*")), ResponseFormat::Json);
    }

    #[test]
    fn test_plain_text_negotiated_when_asked() {
        assert_eq!(negotiate(Some("text/plain")), ResponseFormat::PlainText);
        assert_eq!(
            negotiate(Some("text/plain; charset=utf-8")),
            ResponseFormat::PlainText
        );
    }

    #[test]
    fn test_plain_body_is_text_exactly() {
        assert_eq!(
            plain_body(&record()),
            "The smallest change can cause the biggest outage."
        );
    }

    #[test]
    fn test_json_body_carries_all_five_fields() {
        let reply = TruthReply::new(&record(), "monday");
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "truth": "The smallest change can cause the biggest outage.",
                "category": "risk",
                "day": "monday",
                "weight": "high",
                "id": "truth-021",
            })
        );
    }
}
