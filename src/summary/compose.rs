use log::warn;

use super::normalize::{Listing, NormalizedFields};
use super::{SegmentStyle, SummarySegment};
use crate::error::{ComposeError, SummaryError};

pub const FALLBACK_NOTE: &str = "Note: Using fallback schema.org parsing (may miss some details).";

/// Accumulates segments until a field cannot be laid out
struct Layout {
    segments: Vec<SummarySegment>,
}

impl Layout {
    fn push(&mut self, text: String, style: SegmentStyle) {
        self.segments.push(SummarySegment::new(text, style));
    }

    fn line(
        &mut self,
        part: &str,
        value: &str,
        text: impl FnOnce(&str) -> String,
        style: SegmentStyle,
    ) -> Result<(), ComposeError> {
        single_line(part, value)?;
        self.push(text(value), style);
        Ok(())
    }

    fn listing(
        &mut self,
        heading: &str,
        part: &str,
        listing: &Listing,
        item: impl Fn(&str) -> String,
        missing_tail: &str,
    ) -> Result<(), ComposeError> {
        let items = match listing {
            Listing::Found(items) => items,
            Listing::Missing(marker) => {
                self.push(
                    format!("{heading}: {marker}{missing_tail}"),
                    SegmentStyle::Heading,
                );
                return Ok(());
            }
        };

        self.push(format!("{heading}:\n"), SegmentStyle::Heading);
        for (i, value) in items.iter().enumerate() {
            single_line(part, value)?;
            let mut text = item(value);
            if i + 1 == items.len() {
                text.push('\n');
            }
            self.push(text, SegmentStyle::Body);
        }
        Ok(())
    }
}

fn single_line(part: &str, value: &str) -> Result<(), ComposeError> {
    if value.contains(['\n', '\r']) {
        return Err(ComposeError::LineBreak {
            part: part.to_string(),
        });
    }
    Ok(())
}

fn lay_out(layout: &mut Layout, fields: &NormalizedFields) -> Result<(), ComposeError> {
    if fields.title.trim().is_empty() {
        return Err(ComposeError::Blank {
            part: "title".to_string(),
        });
    }
    layout.line("title", &fields.title, |t| format!("{t}\n\n"), SegmentStyle::Title)?;
    layout.line(
        "servings",
        &fields.servings,
        |s| format!("Servings: {s}\n"),
        SegmentStyle::Heading,
    )?;
    layout.line("times", &fields.times, |t| format!("{t}\n"), SegmentStyle::Heading)?;
    layout.push(
        format!("Notes: {}\n\n", fields.description),
        SegmentStyle::Heading,
    );
    layout.listing(
        "Ingredients",
        "ingredient",
        &fields.ingredients,
        |item| format!("• {item}\n"),
        "\n\n",
    )?;
    layout.listing(
        "Instructions",
        "step",
        &fields.instructions,
        |step| format!("{step}\n"),
        "\n",
    )?;
    Ok(())
}

/// Lay the normalized fields out as styled segments.
///
/// If a field cannot be laid out, the segments produced so far are kept and
/// an error segment is appended after them.
pub fn compose(fields: &NormalizedFields, used_fallback: bool) -> Vec<SummarySegment> {
    let mut layout = Layout {
        segments: Vec::new(),
    };
    if used_fallback {
        layout.push(format!("{FALLBACK_NOTE}\n\n"), SegmentStyle::Note);
    }

    if let Err(e) = lay_out(&mut layout, fields) {
        warn!("Summary cut short: {e}");
        let err = SummaryError::from(e);
        let mut text = format!("\n{err}");
        if let Some(hint) = err.hint() {
            text.push('\n');
            text.push_str(hint);
        }
        layout.push(text, SegmentStyle::Error);
    }

    layout.segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::normalize::{INGREDIENTS_MISSING, INSTRUCTIONS_MISSING};

    fn fields() -> NormalizedFields {
        NormalizedFields {
            title: "Lemon Pasta".to_string(),
            servings: "4 servings".to_string(),
            times: "Total: 20 min".to_string(),
            description: "Bright and quick.".to_string(),
            ingredients: Listing::Found(vec!["pasta".to_string(), "1 lemon".to_string()]),
            instructions: Listing::Found(vec!["1. Boil.".to_string(), "2. Toss.".to_string()]),
        }
    }

    fn texts(segments: &[SummarySegment]) -> Vec<(&str, SegmentStyle)> {
        segments.iter().map(|s| (s.text.as_str(), s.style)).collect()
    }

    #[test]
    fn test_full_layout() {
        let segments = compose(&fields(), false);
        assert_eq!(
            texts(&segments),
            vec![
                ("Lemon Pasta\n\n", SegmentStyle::Title),
                ("Servings: 4 servings\n", SegmentStyle::Heading),
                ("Total: 20 min\n", SegmentStyle::Heading),
                ("Notes: Bright and quick.\n\n", SegmentStyle::Heading),
                ("Ingredients:\n", SegmentStyle::Heading),
                ("• pasta\n", SegmentStyle::Body),
                ("• 1 lemon\n\n", SegmentStyle::Body),
                ("Instructions:\n", SegmentStyle::Heading),
                ("1. Boil.\n", SegmentStyle::Body),
                ("2. Toss.\n\n", SegmentStyle::Body),
            ]
        );
    }

    #[test]
    fn test_fallback_note_comes_first() {
        let segments = compose(&fields(), true);
        assert_eq!(segments[0].style, SegmentStyle::Note);
        assert_eq!(
            segments[0].text,
            "Note: Using fallback schema.org parsing (may miss some details).\n\n"
        );
        assert_eq!(segments[1].style, SegmentStyle::Title);
    }

    #[test]
    fn test_missing_lists() {
        let mut fields = fields();
        fields.ingredients = Listing::Missing(INGREDIENTS_MISSING);
        fields.instructions = Listing::Missing(INSTRUCTIONS_MISSING);

        let segments = compose(&fields, false);
        let tail = texts(&segments[4..]);
        assert_eq!(
            tail,
            vec![
                ("Ingredients: (not found)\n\n", SegmentStyle::Heading),
                (
                    "Instructions: (not extracted – see original site)\n",
                    SegmentStyle::Heading
                ),
            ]
        );
    }

    #[test]
    fn test_line_break_keeps_partial_output() {
        let mut fields = fields();
        fields.ingredients = Listing::Found(vec!["pasta".to_string(), "1\nlemon".to_string()]);

        let segments = compose(&fields, false);
        let last = segments.last().unwrap();
        assert_eq!(last.style, SegmentStyle::Error);
        assert_eq!(
            last.text,
            "\nUnexpected parsing issue: ingredient spans several lines\nPartial data shown above."
        );
        // title, servings, times, notes, heading, first item, error
        assert_eq!(segments.len(), 7);
        assert_eq!(segments[5].text, "• pasta\n");
    }

    #[test]
    fn test_blank_title_is_an_error() {
        let mut fields = fields();
        fields.title = " ".to_string();

        let segments = compose(&fields, true);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].style, SegmentStyle::Note);
        assert_eq!(
            segments[1].text,
            "\nUnexpected parsing issue: title is blank\nPartial data shown above."
        );
    }

    #[test]
    fn test_description_may_span_lines() {
        let mut fields = fields();
        fields.description = "First.\nSecond.".to_string();

        let segments = compose(&fields, false);
        assert!(segments.iter().all(|s| s.style != SegmentStyle::Error));
        assert_eq!(segments[3].text, "Notes: First.\nSecond.\n\n");
    }

    #[test]
    fn test_compose_is_deterministic() {
        assert_eq!(compose(&fields(), true), compose(&fields(), true));
    }
}
