use anyhow::{bail, Result};
use common::pagedir::{PageDirectory, WebPage};
use common::tokenizer::index_words;
use common::{DocId, InvertedIndex};

/// Initial table size for a freshly built index.
const SLOTS: usize = 300;

/// Index every page of a crawl. Pages are read as 1, 2, 3, ... and the first
/// missing ID ends the corpus; a missing page 1 is an error.
pub fn build_index(pages: &PageDirectory) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::with_capacity(SLOTS);
    let mut doc_id: DocId = 1;

    while let Some(page) = pages.load(doc_id)? {
        index_page(&mut index, &page, doc_id)?;
        tracing::debug!(doc_id, url = %page.url, "indexed page");
        doc_id += 1;
    }
    if doc_id == 1 {
        bail!("cannot read first page in {}", pages.root.display());
    }

    tracing::info!(num_docs = doc_id - 1, num_words = index.len(), "ingested documents");
    Ok(index)
}

/// Count each indexable word of `page` under `doc_id`.
pub fn index_page(index: &mut InvertedIndex, page: &WebPage, doc_id: DocId) -> Result<()> {
    for word in index_words(&page.html) {
        if index.find(&word).is_none() {
            index.insert(&word);
        }
        index.increment(&word, doc_id)?;
    }
    Ok(())
}
