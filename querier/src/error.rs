use crate::token::Operator;
use thiserror::Error;

/// Reasons a query line is rejected. All of them are reported to the user
/// and the querier moves on to the next line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No letters at all; the line is skipped without a message.
    #[error("query is blank")]
    Blank,

    #[error("bad character '{0}' in query")]
    BadCharacter(char),

    #[error("'{0}' cannot be first")]
    LeadingOperator(Operator),

    #[error("'{0}' cannot be last")]
    TrailingOperator(Operator),

    #[error("'{0}' and '{1}' cannot be adjacent")]
    AdjacentOperators(Operator, Operator),
}
