use crate::models::candidate::Candidate;
use crate::models::query::{Query, QueryField};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn any_field_contains(candidate: &Candidate, needle: &str) -> bool {
    candidate
        .search_haystacks()
        .iter()
        .any(|haystack| contains_ci(haystack, needle))
}

/// Whether one candidate satisfies the query.
pub fn matches(candidate: &Candidate, query: &Query) -> bool {
    match query {
        Query::FieldFilter {
            field: QueryField::Email,
            value,
        } => candidate
            .email
            .as_deref()
            .is_some_and(|email| contains_ci(email, value)),
        Query::FieldFilter {
            field: QueryField::Name,
            value,
        } => contains_ci(&candidate.name_text(), value),
        Query::Phrase(phrase) => any_field_contains(candidate, phrase),
        // AND across tokens, OR across fields per token.
        Query::FreeText(tokens) => tokens.iter().all(|token| any_field_contains(candidate, token)),
    }
}

/// Order-preserving filter. Never re-sorts; the input order is the output
/// order, which is what makes repeated pagination over the same query stable.
pub fn match_candidates(candidates: &[Candidate], query: &Query) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|candidate| matches(candidate, query))
        .cloned()
        .collect()
}
