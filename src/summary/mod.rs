//! The three-section summary: normalized fields laid out as styled segments.

mod compose;
mod normalize;

pub use compose::{compose, FALLBACK_NOTE};
pub use normalize::{
    normalize, Listing, NormalizedFields, DESCRIPTION_LIMIT, INGREDIENTS_MISSING,
    INSTRUCTIONS_MISSING,
};

use serde::Serialize;

use crate::error::SummaryError;

/// How the host should emphasise a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStyle {
    Title,
    Heading,
    Body,
    Note,
    Error,
}

/// One styled run of output text. `text` is exactly what is displayed,
/// trailing line breaks included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySegment {
    pub text: String,
    pub style: SegmentStyle,
}

impl SummarySegment {
    pub fn new(text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// The text without surrounding line breaks
    pub fn line(&self) -> &str {
        self.text.trim_matches('\n')
    }
}

/// Output of one summarize call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub segments: Vec<SummarySegment>,
}

impl Summary {
    pub fn new(segments: Vec<SummarySegment>) -> Self {
        Self { segments }
    }

    /// A summary holding only the message for a failed run
    pub fn from_error(err: &SummaryError) -> Self {
        let mut text = format!("{err}\n");
        if let Some(hint) = err.hint() {
            text.push_str(hint);
            text.push('\n');
        }
        Self::new(vec![SummarySegment::new(text, SegmentStyle::Error)])
    }

    /// Plain rendering, as the host shows it without styling
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// The recipe title line, if the summary got that far
    pub fn title(&self) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.style == SegmentStyle::Title)
            .map(SummarySegment::line)
    }

    /// Whether the run ended in an error segment
    pub fn is_error(&self) -> bool {
        self.segments
            .last()
            .is_some_and(|s| s.style == SegmentStyle::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_adds_hint() {
        let summary = Summary::from_error(&SummaryError::Parse("boom".to_string()));
        assert_eq!(
            summary.text(),
            "Parsing error: boom\nTry a different recipe site.\n"
        );
        assert!(summary.is_error());
        assert_eq!(summary.title(), None);
    }

    #[test]
    fn test_fallback_failed_has_no_hint() {
        let summary = Summary::from_error(&SummaryError::FallbackFailed("no schema".to_string()));
        assert_eq!(summary.text(), "Fallback failed: no schema\n");
    }

    #[test]
    fn test_segment_line() {
        let segment = SummarySegment::new("Test Pie\n\n", SegmentStyle::Title);
        assert_eq!(segment.line(), "Test Pie");
    }

    #[test]
    fn test_segments_serialize_with_style_tags() {
        let summary = Summary::new(vec![SummarySegment::new("Pie\n\n", SegmentStyle::Title)]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["segments"][0]["style"], "title");
    }
}
