//! Boolean query evaluation over the inverted index.
//!
//! Adjacent words (with or without an explicit `and`) form an and-group whose
//! counts are intersected; `or` separates groups, whose scores are summed. So
//! `a b or c and d` means `(a AND b) OR (c AND d)`.

use crate::token::{Operator, Token};
use crate::Query;
use common::{Counterset, InvertedIndex};

/// Score every document against `query`, which must already be validated.
///
/// Within a group each document keeps the minimum count over the group's
/// words; across groups the group scores are added. Words missing from the
/// index match nothing, which empties their group.
pub fn evaluate(query: &Query, index: &InvertedIndex) -> Counterset {
    let mut result = Counterset::new();
    let mut group: Option<Counterset> = None;

    for token in query.tokens() {
        match token {
            Token::Operator(Operator::And) => {}
            Token::Operator(Operator::Or) => {
                if let Some(done) = group.take() {
                    result.union_with(&done);
                }
            }
            Token::Word(word) => {
                let term = index.find(word);
                group = Some(match group.take() {
                    // First word of a group decides which documents are candidates.
                    None => term.cloned().unwrap_or_default(),
                    Some(mut acc) => {
                        acc.intersect_with(term);
                        acc
                    }
                });
            }
        }
    }
    if let Some(done) = group {
        result.union_with(&done);
    }
    result
}
