use common::pagedir::DocumentLookup;
use common::{Counterset, DocId};
use serde::Serialize;
use std::io::{self, Write};

/// Printed after every answered query.
pub const SEPARATOR: &str = "-----------------------------------------------";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: u32,
    pub url: Option<String>,
}

/// Documents with a positive score, best first. Equal scores are ordered by
/// ascending document ID so the ranking is reproducible.
pub fn rank(scores: &Counterset) -> Vec<(DocId, u32)> {
    let mut ranked: Vec<(DocId, u32)> = scores.iter().filter(|&(_, score)| score > 0).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

pub fn resolve(ranked: &[(DocId, u32)], lookup: &impl DocumentLookup) -> Vec<SearchHit> {
    ranked
        .iter()
        .map(|&(doc_id, score)| {
            let url = lookup.find_url(doc_id);
            if url.is_none() {
                tracing::warn!(doc_id, "no page found for matching document");
            }
            SearchHit { doc_id, score, url }
        })
        .collect()
}

/// Write the plain-text results block for one query.
pub fn render<W: Write>(hits: &[SearchHit], mut out: W) -> io::Result<()> {
    if hits.is_empty() {
        writeln!(out, "No documents match")?;
    } else {
        writeln!(out, "Matches ({}) documents (ranked):", hits.len())?;
        for hit in hits {
            let url = hit.url.as_deref().unwrap_or("(unknown)");
            writeln!(out, "score {:5} doc {:5}: {}", hit.score, hit.doc_id, url)?;
        }
    }
    writeln!(out, "{SEPARATOR}")
}
