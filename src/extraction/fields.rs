//! Heuristic field parsing over extracted brochure text.
//!
//! Each field has its own pure function, applied independently — failure of
//! one never blocks another, and none of them raise: no match is `None`.
//! Where several strategies exist for a field they run in descending
//! confidence order, first hit wins.
//!
//! Match selection within a document is *first match in document order*; the
//! year heuristic additionally prefers its keywords in priority order
//! (`established` before `designated` before `created`).

use chrono::{Datelike, Utc};
use regex::Regex;

/// The optional fields recovered from one brochure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub state: Option<String>,
    pub established_year: Option<u16>,
    pub size: Option<String>,
}

impl ParsedFields {
    /// Whether at least one field was recovered.
    pub fn any(&self) -> bool {
        self.state.is_some() || self.established_year.is_some() || self.size.is_some()
    }
}

/// U.S. state names paired with their postal abbreviations. Multi-word names
/// sort after their prefixes so alternation picks the longer form.
const STATES: [(&str, &str); 50] = [
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// Parse all fields from extracted text. Pure; identical input yields
/// identical output.
pub fn parse_fields(text: &str) -> ParsedFields {
    ParsedFields {
        state: parse_state(text),
        established_year: parse_established_year(text),
        size: parse_size(text),
    }
}

/// Find the U.S. state the brochure names, as the canonical full state name.
///
/// Strategy 1: a state name or uppercase postal abbreviation adjacent to a
/// contextual keyword ("located in", "State of"). Strategy 2: the first bare
/// state name anywhere in the text.
pub fn parse_state(text: &str) -> Option<String> {
    let names = state_name_alternation();

    // Strategy 1a: keyword-anchored full name
    let anchored = Regex::new(&format!(
        r"(?i)(?:located in|state of)\s+(?:the\s+)?({names})\b"
    ))
    .expect("anchored state regex is valid");
    if let Some(caps) = anchored.captures(text) {
        return canonical_state(&caps[1]);
    }

    // Strategy 1b: keyword-anchored postal abbreviation, uppercase only
    // (matching "in" or "or" lowercase would false-positive everywhere)
    let abbrs: Vec<&str> = STATES.iter().map(|(_, a)| *a).collect();
    let anchored_abbr = Regex::new(&format!(
        r"(?i:located in|state of)\s+({})\b",
        abbrs.join("|")
    ))
    .expect("abbreviation state regex is valid");
    if let Some(caps) = anchored_abbr.captures(text) {
        if let Some((name, _)) = STATES.iter().find(|(_, a)| *a == &caps[1]) {
            return Some((*name).to_string());
        }
    }

    // Strategy 2: first bare state name in document order
    let bare = Regex::new(&format!(r"(?i)\b({names})\b")).expect("bare state regex is valid");
    bare.captures(text)
        .and_then(|caps| canonical_state(&caps[1]))
}

/// Find the establishment year: a 4-digit number adjacent to an
/// establishment keyword, constrained to [1800, current year] to reject page
/// numbers and phone fragments.
pub fn parse_established_year(text: &str) -> Option<u16> {
    let patterns = [
        r"(?i)established[:\s]+(?:in\s+)?(\d{4})",
        r"(?i)designated[:\s]+(?:in\s+)?(\d{4})",
        r"(?i)created[:\s]+(?:in\s+)?(\d{4})",
    ];
    let max_year = Utc::now().year();

    for pattern in patterns {
        let re = Regex::new(pattern).expect("year regex is valid");
        if let Some(caps) = re.captures(text) {
            if let Ok(year) = caps[1].parse::<i32>() {
                if (1800..=max_year).contains(&year) {
                    return Some(year as u16);
                }
            }
        }
    }
    None
}

/// Find the park's size: a number followed by a unit keyword, captured
/// verbatim (not normalized to a canonical unit).
pub fn parse_size(text: &str) -> Option<String> {
    let patterns = [
        r"(?i)\d[\d,]*\s+acres",
        r"(?i)\d[\d,]*\s+square\s+miles",
        r"(?i)\d[\d,]*\s+hectares",
    ];
    for pattern in patterns {
        let re = Regex::new(pattern).expect("size regex is valid");
        if let Some(m) = re.find(text) {
            return Some(m.as_str().to_string());
        }
    }
    None
}

/// Alternation of all full state names, longest-prefix forms first where it
/// matters ("West Virginia" must be listed so it can win at its position).
fn state_name_alternation() -> String {
    STATES
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join("|")
}

/// Map a case-insensitive match back to the canonical table spelling.
fn canonical_state(matched: &str) -> Option<String> {
    STATES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(matched))
        .map(|(name, _)| (*name).to_string())
}
