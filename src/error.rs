use thiserror::Error;

/// Reasons puzzle input may fail to parse.
///
/// Line numbers are 1-based, counted over the whole input including blank lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A triple did not have exactly three comma-separated fields.
    #[error("expected 3 comma-separated fields, found {found} in {text:?}")]
    FieldCount { text: String, found: usize },
    /// A field was not an integer.
    #[error("{field:?} is not an integer")]
    NotAnInteger { field: String },
    /// A hailstone line had no `@` between position and velocity.
    #[error("missing '@' separator in {text:?}")]
    MissingVelocity { text: String },
    /// A component line had no `:` after the subject name.
    #[error("missing ':' separator in {text:?}")]
    MissingColon { text: String },
    /// A component line had nothing before its `:`.
    #[error("empty component name in {text:?}")]
    EmptyComponent { text: String },
    /// A component listed itself as a neighbour.
    #[error("component {name:?} is wired to itself")]
    SelfLoop { name: String },
    /// Wraps any of the above with the line it was found on.
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub(crate) fn at_line(self, line: usize) -> Self {
        Self::AtLine { line, source: Box::new(self) }
    }
}
