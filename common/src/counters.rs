use std::collections::btree_map;
use std::collections::BTreeMap;

pub type DocId = u32;

/// Sparse map from document ID to an occurrence count (or, once a query has
/// combined several of them, a score).
///
/// A key stored with count 0 is still present and still iterated; an absent
/// key reads as 0 but is never iterated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counterset {
    counts: BTreeMap<DocId, u32>,
}

impl Counterset {
    pub fn new() -> Self { Self::default() }

    /// Increment the count for `doc_id`, inserting it with 1 if absent.
    /// Returns the updated count. Counts saturate at `u32::MAX`.
    pub fn add(&mut self, doc_id: DocId) -> u32 {
        let count = self.counts.entry(doc_id).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn get(&self, doc_id: DocId) -> u32 {
        self.counts.get(&doc_id).copied().unwrap_or(0)
    }

    pub fn set(&mut self, doc_id: DocId, count: u32) {
        self.counts.insert(doc_id, count);
    }

    pub fn contains(&self, doc_id: DocId) -> bool { self.counts.contains_key(&doc_id) }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    /// Present keys with their counts, in ascending document order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.counts.iter() }
    }

    /// AND a term into this set: every key already present keeps the smaller
    /// of the two counts. Keys that end up at 0 are dropped, and keys found
    /// only in `other` are never added. `None` stands for a word with no
    /// index entry and empties the set.
    pub fn intersect_with(&mut self, other: Option<&Counterset>) {
        let Some(other) = other else {
            self.counts.clear();
            return;
        };
        self.counts.retain(|doc_id, count| {
            *count = (*count).min(other.get(*doc_id));
            *count > 0
        });
    }

    /// OR a term into this set: scores of shared keys are summed, saturating
    /// at `u32::MAX`, and keys found only in `other` are inserted.
    pub fn union_with(&mut self, other: &Counterset) {
        for (doc_id, count) in other {
            let score = self.counts.entry(doc_id).or_insert(0);
            *score = score.saturating_add(count);
        }
    }
}

/// Iterator over `(doc_id, count)` pairs of a [`Counterset`].
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, DocId, u32>,
}

impl Iterator for Iter<'_> {
    type Item = (DocId, u32);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(doc_id, count)| (*doc_id, *count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<'a> IntoIterator for &'a Counterset {
    type Item = (DocId, u32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl FromIterator<(DocId, u32)> for Counterset {
    fn from_iter<I: IntoIterator<Item = (DocId, u32)>>(iter: I) -> Self {
        Counterset { counts: iter.into_iter().collect() }
    }
}
