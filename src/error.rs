use thiserror::Error;

/// Everything that can go wrong between a desired-state map and a finished
/// DDL statement. Validation and rendering fail before any SQL text is
/// returned; nothing is retried or swallowed.
#[derive(Error, Debug)]
pub enum DdlError {
    #[error("invalid Snowflake identifier: {0}")]
    InvalidIdentifier(String),

    #[error("invalid Snowflake object name: {0}")]
    InvalidObjectName(String),

    #[error("invalid Snowflake integer: {0}")]
    InvalidInteger(String),

    #[error("cannot render a {kind} value for {context}")]
    UnsupportedType { kind: &'static str, context: String },

    #[error("required attribute {0} has no value")]
    MissingRequiredAttribute(String),

    #[error("attribute {0} is declared twice in the same schema")]
    DuplicateAttribute(String),

    #[error("statement has {expected} placeholders but {supplied} bindings")]
    BindingMismatch { expected: usize, supplied: usize },

    #[error("changing {0:?} requires the resource to be replaced")]
    ReplacementRequired(Vec<String>),

    #[error(transparent)]
    Execution(#[from] anyhow::Error),
}
