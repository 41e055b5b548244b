use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntervalParseError {
    #[error("Missing {field} field on line {line}")]
    MissingField { field: &'static str, line: usize },

    #[error("Can't parse {field} value '{value}' on line {line}")]
    InvalidCoordinate {
        field: &'static str,
        value: String,
        line: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
