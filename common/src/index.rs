use crate::{Counterset, DocId, IndexError};
use std::collections::HashMap;
use std::io::{BufRead, Write};

/// Word -> per-document occurrence counts for a whole crawl.
///
/// Built once by the indexer, written to a text file, and reloaded
/// read-only by the querier. Each word owns exactly one [`Counterset`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    words: HashMap<String, Counterset>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// `hint` is the expected number of distinct words; it only sizes the table.
    pub fn with_capacity(hint: usize) -> Self {
        Self { words: HashMap::with_capacity(hint) }
    }

    /// Add `word` with an empty counterset. Returns false if it was already indexed.
    pub fn insert(&mut self, word: &str) -> bool {
        if self.words.contains_key(word) {
            return false;
        }
        self.words.insert(word.to_string(), Counterset::new());
        true
    }

    /// Count one more occurrence of `word` in `doc_id` and return the new count.
    /// The word must have been inserted first.
    pub fn increment(&mut self, word: &str, doc_id: DocId) -> Result<u32, IndexError> {
        self.words
            .get_mut(word)
            .map(|counts| counts.add(doc_id))
            .ok_or_else(|| IndexError::UnknownWord(word.to_string()))
    }

    pub fn find(&self, word: &str) -> Option<&Counterset> { self.words.get(word) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Counterset)> {
        self.words.iter().map(|(w, c)| (w.as_str(), c))
    }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    /// Write one line per word: `word doc count doc count ...`.
    /// Words are sorted so that identical indexes produce identical files.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), IndexError> {
        let mut entries: Vec<(&str, &Counterset)> = self.iter().collect();
        entries.sort_by_key(|(word, _)| *word);
        for (word, counts) in entries {
            write!(out, "{word}")?;
            for (doc_id, count) in counts {
                write!(out, " {doc_id} {count}")?;
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Parse the format produced by [`InvertedIndex::write_to`].
    ///
    /// A word appearing on more than one line accumulates its counts, the same
    /// as replaying every occurrence through `increment`; a pair with count 0
    /// therefore adds nothing. A sum that does not fit a `u32` is malformed.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, IndexError> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        let mut index = InvertedIndex::with_capacity(lines.len());

        for (lineno, line) in lines.iter().enumerate() {
            let lineno = lineno + 1;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else { continue };
            let counts = index.words.entry(word.to_string()).or_default();

            while let Some(doc_field) = fields.next() {
                let count_field = fields
                    .next()
                    .ok_or_else(|| IndexError::malformed(lineno, format!("document {doc_field} has no count")))?;
                let doc_id: DocId = parse_field(lineno, doc_field)?;
                if doc_id == 0 {
                    return Err(IndexError::malformed(lineno, "document ids start at 1"));
                }
                let count: u32 = parse_field(lineno, count_field)?;
                if count == 0 {
                    continue;
                }
                let total = counts
                    .get(doc_id)
                    .checked_add(count)
                    .ok_or_else(|| IndexError::malformed(lineno, "count overflows"))?;
                counts.set(doc_id, total);
            }
        }
        Ok(index)
    }
}

fn parse_field(lineno: usize, field: &str) -> Result<u32, IndexError> {
    field
        .parse()
        .map_err(|_| IndexError::malformed(lineno, format!("'{field}' is not a non-negative integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        index.insert("cat");
        index.insert("dog");
        index.increment("cat", 1).unwrap();
        index.increment("cat", 1).unwrap();
        index.increment("cat", 2).unwrap();
        for _ in 0..3 {
            index.increment("dog", 2).unwrap();
        }
        index.increment("dog", 3).unwrap();
        index
    }

    #[test]
    fn insert_is_once_per_word() {
        let mut index = InvertedIndex::new();
        assert!(index.insert("rust"));
        assert!(!index.insert("rust"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn increment_returns_running_count() {
        let mut index = InvertedIndex::new();
        index.insert("rust");
        assert_eq!(index.increment("rust", 4).unwrap(), 1);
        assert_eq!(index.increment("rust", 4).unwrap(), 2);
        assert_eq!(index.find("rust").unwrap().get(4), 2);
    }

    #[test]
    fn increment_unknown_word_is_an_error() {
        let mut index = InvertedIndex::new();
        let err = index.increment("ghost", 1).unwrap_err();
        assert!(matches!(err, IndexError::UnknownWord(w) if w == "ghost"));
    }

    #[test]
    fn find_missing_is_none() {
        assert!(pets().find("xyz").is_none());
    }

    #[test]
    fn writes_sorted_lines() {
        let mut buf = Vec::new();
        pets().write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "cat 1 2 2 1\ndog 2 3 3 1\n");
    }

    #[test]
    fn read_write_round_trip() {
        let index = pets();
        let mut buf = Vec::new();
        index.write_to(&mut buf).unwrap();
        let loaded = InvertedIndex::read_from(buf.as_slice()).unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn reads_trailing_spaces_and_blank_lines() {
        let text = "cat 1 2 2 1 \n\ndog 2 3 3 1 \n";
        let loaded = InvertedIndex::read_from(text.as_bytes()).unwrap();
        assert_eq!(loaded, pets());
    }

    #[test]
    fn repeated_word_lines_accumulate() {
        let loaded = InvertedIndex::read_from("cat 1 2\ncat 1 1 5 1\n".as_bytes()).unwrap();
        let cat = loaded.find("cat").unwrap();
        assert_eq!(cat.get(1), 3);
        assert_eq!(cat.get(5), 1);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn iter_yields_every_word_once() {
        let index = pets();
        let mut words: Vec<(&str, usize)> = index.iter().map(|(w, c)| (w, c.len())).collect();
        words.sort();
        assert_eq!(words, vec![("cat", 2), ("dog", 2)]);
        assert_eq!(index.iter().find(|(w, _)| *w == "dog").map(|(_, c)| c.get(2)), Some(3));
    }

    #[test]
    fn zero_count_pairs_add_no_document() {
        let loaded = InvertedIndex::read_from("cat 1 0 2 1\n".as_bytes()).unwrap();
        let cat = loaded.find("cat").unwrap();
        assert!(!cat.contains(1));
        assert_eq!(cat.iter().collect::<Vec<_>>(), vec![(2, 1)]);

        let mut buf = Vec::new();
        loaded.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "cat 2 1\n");
    }

    #[test]
    fn overflowing_count_is_malformed() {
        let err = InvertedIndex::read_from("cat 1 4294967295 1 1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, IndexError::Malformed { line: 1, .. }));

        let err = InvertedIndex::read_from("cat 1 4294967295\ncat 1 1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, IndexError::Malformed { line: 2, .. }));
    }

    #[test]
    fn dangling_document_is_malformed() {
        let err = InvertedIndex::read_from("cat 1 2\ndog 4\n".as_bytes()).unwrap_err();
        assert!(matches!(err, IndexError::Malformed { line: 2, .. }));
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let err = InvertedIndex::read_from("cat one 2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, IndexError::Malformed { line: 1, .. }));
    }

    #[test]
    fn document_zero_is_malformed() {
        let err = InvertedIndex::read_from("cat 0 2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, IndexError::Malformed { line: 1, .. }));
    }
}
