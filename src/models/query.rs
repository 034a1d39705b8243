use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    Email,
    Name,
}

impl QueryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryField::Email => "email",
            QueryField::Name => "name",
        }
    }
}

/// A parsed search input. Exactly one interpretation applies: field prefix
/// wins over quoting, quoting wins over free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `field:value` restriction to one named attribute.
    FieldFilter { field: QueryField, value: String },
    /// Exact, whitespace-normalized substring requested via quoting.
    Phrase(String),
    /// Whitespace-split tokens, every one of which must match.
    FreeText(Vec<String>),
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::FieldFilter { field, value } => write!(f, "{}:{}", field.as_str(), value),
            Query::Phrase(phrase) => write!(f, "\"{}\"", phrase),
            Query::FreeText(tokens) => write!(f, "{}", tokens.join(" ")),
        }
    }
}
