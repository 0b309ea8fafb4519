pub mod error;
pub mod eval;
pub mod rank;
pub mod token;

use common::pagedir::DocumentLookup;
use common::InvertedIndex;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::time::Instant;

pub use error::QueryError;
pub use eval::evaluate;
pub use rank::{rank, render, resolve, SearchHit};
pub use token::{Operator, Query, Token};

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

/// Evaluate a validated query and rank the matching documents.
pub fn search(query: &Query, index: &InvertedIndex, lookup: &impl DocumentLookup) -> SearchResponse {
    let start = Instant::now();
    let scores = evaluate(query, index);
    let results = resolve(&rank(&scores), lookup);
    let elapsed = start.elapsed();
    tracing::debug!(query = %query, hits = results.len(), took_s = elapsed.as_secs_f64(), "query answered");
    SearchResponse { query: query.to_string(), took_s: elapsed.as_secs_f64(), total_hits: results.len(), results }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Answers query lines against one loaded index.
pub struct Querier<'a, L> {
    pub index: &'a InvertedIndex,
    pub lookup: &'a L,
    pub format: OutputFormat,
}

impl<'a, L: DocumentLookup> Querier<'a, L> {
    pub fn new(index: &'a InvertedIndex, lookup: &'a L) -> Self {
        Self { index, lookup, format: OutputFormat::Text }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Answer one line. Rejected queries get a diagnostic on `out`; blank
    /// lines produce nothing.
    pub fn answer<W: Write>(&self, line: &str, mut out: W) -> io::Result<()> {
        let query = match Query::parse(line) {
            Ok(q) => q,
            Err(QueryError::Blank) => return Ok(()),
            Err(e) => return self.reject(&e, out),
        };
        if self.format == OutputFormat::Text {
            writeln!(out, "Query: {query}")?;
        }
        if let Err(e) = query.validate() {
            return self.reject(&e, out);
        }

        let response = search(&query, self.index, self.lookup);
        match self.format {
            OutputFormat::Text => render(&response.results, out),
            OutputFormat::Json => {
                serde_json::to_writer(&mut out, &response)?;
                writeln!(out)
            }
        }
    }

    /// Read queries until end of input. `prompt` is shown before each read.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut out: W, prompt: bool) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, "Query? ")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else { break };
            self.answer(&line?, &mut out)?;
            out.flush()?;
        }
        if prompt {
            writeln!(out)?;
        }
        Ok(())
    }

    fn reject<W: Write>(&self, err: &QueryError, mut out: W) -> io::Result<()> {
        tracing::debug!(error = %err, "query rejected");
        match self.format {
            OutputFormat::Text => writeln!(out, "Error: {err}"),
            OutputFormat::Json => {
                serde_json::to_writer(&mut out, &serde_json::json!({ "error": err.to_string() }))?;
                writeln!(out)
            }
        }
    }
}
