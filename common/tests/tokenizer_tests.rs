use common::tokenizer::{index_words, page_words};

#[test]
fn it_normalizes_and_drops_short_words() {
    let words: Vec<String> = index_words("<title>The Tiny Search Engine</title><p>It is OK to be a TSE.</p>").collect();
    assert_eq!(words, vec!["the", "tiny", "search", "engine", "tse"]);
}

#[test]
fn it_ignores_tag_attributes() {
    let html = r#"<a href="http://example.com/wiki/Computer_science.html" title="Computer science">computing</a>"#;
    let words: Vec<String> = page_words(html).collect();
    assert_eq!(words, vec!["computing"]);
}
