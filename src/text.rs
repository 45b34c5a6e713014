//! Text clean-up shared by the scrapers.

use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::TimeValue;

/// Tags that end a line of text
static LINE_BREAK_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</p>|</li>|</div>|</h[1-6]>").expect("Invalid line break regex")
});

static HTML_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("Invalid HTML tag regex"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static ISO_DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^P(?:(\d+(?:\.\d+)?)D)?(?:T(?:(\d+(?:\.\d+)?)H)?(?:(\d+(?:\.\d+)?)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    )
    .expect("Invalid ISO 8601 duration regex")
});

static RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d\s*(?:-|–|to)\s*\d").expect("Invalid range regex"));

/// A number and its unit, e.g. "1 hr" or the "30m" in "1h30m". Longer unit
/// spellings come first so they win over their one-letter forms.
static DURATION_PART_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(hours|hour|hrs|hr|h|minutes|minute|mins|min|m)")
        .expect("Invalid duration part regex")
});

/// What sits between the two ends of a range such as "15 mins - 20 mins"
static RANGE_JOINER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:-|–|to)\s*$").expect("Invalid range joiner regex"));

pub fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Decode entities and collapse all whitespace (including nbsp) to single spaces.
pub fn normalize_string(text: &str) -> String {
    let decoded = decode_html_symbols(text).replace('\u{a0}', " ");
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Turn an HTML snippet into newline-separated plain lines.
pub fn html_to_lines(text: &str) -> Vec<String> {
    let broken = LINE_BREAK_TAG_RE.replace_all(text, "\n");
    let stripped = HTML_TAG_RE.replace_all(&broken, "");
    stripped
        .lines()
        .map(normalize_string)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Minutes in an ISO 8601 duration such as `PT1H30M` or `PT5400.0S`.
pub fn parse_iso_duration(duration: &str) -> Option<f64> {
    let caps = ISO_DURATION_RE.captures(duration.trim())?;
    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
    };

    let (days, hours, minutes, seconds) = (part(1), part(2), part(3), part(4));
    if days.is_none() && hours.is_none() && minutes.is_none() && seconds.is_none() {
        return None;
    }

    Some(
        days.unwrap_or(0.0) * 24.0 * 60.0
            + hours.unwrap_or(0.0) * 60.0
            + minutes.unwrap_or(0.0)
            + seconds.unwrap_or(0.0) / 60.0,
    )
}

/// Read a duration the way recipe pages print it: ISO 8601, a bare number of
/// minutes, or text like "1 hr 15 mins". Ranges and anything unrecognised
/// are kept as text.
pub fn parse_time_text(raw: &str) -> Option<TimeValue> {
    let text = normalize_string(raw);
    if text.is_empty() {
        return None;
    }

    if let Some(minutes) = parse_iso_duration(&text) {
        return Some(TimeValue::Minutes(minutes));
    }

    if let Ok(minutes) = text.parse::<f64>() {
        return Some(TimeValue::Minutes(minutes));
    }

    if RANGE_RE.is_match(&text) {
        return Some(TimeValue::Text(text));
    }

    let parts = duration_parts(&text);
    if parts.is_empty() {
        return Some(TimeValue::Text(text));
    }

    let joined_as_range = parts
        .windows(2)
        .any(|pair| RANGE_JOINER_RE.is_match(&text[pair[0].end..pair[1].start]));
    if joined_as_range {
        return Some(TimeValue::Text(text));
    }

    Some(TimeValue::Minutes(parts.iter().map(|p| p.minutes).sum()))
}

struct DurationPart {
    start: usize,
    end: usize,
    minutes: f64,
}

/// Every "<number> <unit>" in `text`. A unit running on into a word ("5 mugs")
/// is not a unit.
fn duration_parts(text: &str) -> Vec<DurationPart> {
    DURATION_PART_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if text[whole.end()..]
                .chars()
                .next()
                .is_some_and(char::is_alphabetic)
            {
                return None;
            }
            let value = caps[1].parse::<f64>().ok()?;
            let per_unit = if caps[2].to_ascii_lowercase().starts_with('h') {
                60.0
            } else {
                1.0
            };
            Some(DurationPart {
                start: whole.start(),
                end: whole.end(),
                minutes: value * per_unit,
            })
        })
        .collect()
}

pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// "4" -> "4 servings", "1" -> "1 serving", anything descriptive stays as is
pub fn format_yields(yields: &str) -> String {
    match yields.parse::<f64>() {
        Ok(n) if n == 1.0 => "1 serving".to_string(),
        Ok(n) => format!("{} servings", format_number(n)),
        Err(_) => yields.to_string(),
    }
}
