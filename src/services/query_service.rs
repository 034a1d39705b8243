use crate::error::{Error, Result};
use crate::models::query::{Query, QueryField};

const FIELD_PREFIXES: [(&str, QueryField); 2] =
    [("email:", QueryField::Email), ("name:", QueryField::Name)];

/// Parses raw search input. Interpretation priority: field prefix, then
/// quoted phrase, then whitespace-split free text. Whitespace-only input is
/// `EmptyQuery` so callers can prompt instead of searching.
pub fn parse_query(raw: &str) -> Result<Query> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyQuery);
    }

    for (prefix, field) in FIELD_PREFIXES {
        if let Some(head) = trimmed.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                // Quotes inside the value are kept verbatim: `email:"x y"`
                // filters on `"x y"`. Known limitation, preserved on purpose.
                let value = trimmed[prefix.len()..].trim().to_string();
                return Ok(Query::FieldFilter { field, value });
            }
        }
    }

    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        let interior = &trimmed[1..trimmed.len() - 1];
        let phrase = interior.split_whitespace().collect::<Vec<_>>().join(" ");
        if phrase.is_empty() {
            return Err(Error::EmptyQuery);
        }
        return Ok(Query::Phrase(phrase));
    }

    let tokens: Vec<String> = trimmed.split_whitespace().map(str::to_string).collect();
    Ok(Query::FreeText(tokens))
}
