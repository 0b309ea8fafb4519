use crate::QueryError;
use common::tokenizer::normalize_word;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word {
            "and" => Some(Operator::And),
            "or" => Some(Operator::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Operator(Operator),
}

impl Token {
    fn from_word(word: String) -> Self {
        match Operator::from_word(&word) {
            Some(op) => Token::Operator(op),
            None => Token::Word(word),
        }
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Token::Operator(op) => Some(*op),
            Token::Word(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => f.write_str(w),
            Token::Operator(op) => write!(f, "{op}"),
        }
    }
}

/// One tokenized query line. Displays as the normalized query, tokens joined
/// by single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    tokens: Vec<Token>,
}

impl Query {
    /// Check the characters of `line` and split it into lowercase tokens.
    ///
    /// Only ASCII letters and whitespace are accepted. A line with no letters
    /// is [`QueryError::Blank`]. Operator placement is checked separately by
    /// [`Query::validate`] so the query can be echoed first.
    pub fn parse(line: &str) -> Result<Self, QueryError> {
        let mut has_letters = false;
        for c in line.chars() {
            if c.is_ascii_alphabetic() {
                has_letters = true;
            } else if !c.is_whitespace() {
                return Err(QueryError::BadCharacter(c));
            }
        }
        if !has_letters {
            return Err(QueryError::Blank);
        }
        Ok(Query { tokens: tokenize(line) })
    }

    pub fn tokens(&self) -> &[Token] { &self.tokens }

    /// Reject `and`/`or` at either end of the query or next to each other.
    pub fn validate(&self) -> Result<(), QueryError> {
        if let Some(op) = self.tokens.first().and_then(Token::operator) {
            return Err(QueryError::LeadingOperator(op));
        }
        for pair in self.tokens.windows(2) {
            if let (Some(a), Some(b)) = (pair[0].operator(), pair[1].operator()) {
                return Err(QueryError::AdjacentOperators(a, b));
            }
        }
        if let Some(op) = self.tokens.last().and_then(Token::operator) {
            return Err(QueryError::TrailingOperator(op));
        }
        Ok(())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Maximal runs of letters, lowercased, in order.
fn tokenize(line: &str) -> Vec<Token> {
    line.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|run| !run.is_empty())
        .map(|run| {
            let mut word = run.to_string();
            normalize_word(&mut word);
            Token::from_word(word)
        })
        .collect()
}
