use lazy_static::lazy_static;
use regex::Regex;

/// Words shorter than this are not indexed.
pub const MIN_WORD_LEN: usize = 3;

lazy_static! {
    // A tag runs to the next '>'; an unterminated '<' hides the rest of the page.
    static ref TAG: Regex = Regex::new(r"<[^>]*(>|$)").expect("valid regex");
    static ref WORD: Regex = Regex::new(r"[A-Za-z]+").expect("valid regex");
}

/// Lowercase a word in place.
pub fn normalize_word(word: &mut String) {
    word.make_ascii_lowercase();
}

/// Maximal runs of ASCII letters in the text of an HTML page, in document
/// order and as written. Everything inside `<...>` is skipped.
pub fn page_words(html: &str) -> impl Iterator<Item = String> + '_ {
    TAG.split(html)
        .flat_map(|text| WORD.find_iter(text))
        .map(|m| m.as_str().to_string())
}

/// Normalized words of a page that are long enough to be indexed.
pub fn index_words(html: &str) -> impl Iterator<Item = String> + '_ {
    page_words(html)
        .map(|mut word| {
            normalize_word(&mut word);
            word
        })
        .filter(|word| word.len() >= MIN_WORD_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases() {
        let mut w = String::from("HeLLo");
        normalize_word(&mut w);
        assert_eq!(w, "hello");
    }

    #[test]
    fn skips_markup() {
        let words: Vec<String> = page_words("<html><a href=\"x.html\">Home</a> page</html>").collect();
        assert_eq!(words, vec!["Home", "page"]);
    }

    #[test]
    fn splits_on_non_letters() {
        let words: Vec<String> = page_words("don't stop-me now42times").collect();
        assert_eq!(words, vec!["don", "t", "stop", "me", "now", "times"]);
    }

    #[test]
    fn index_words_filters_short_and_normalizes() {
        let words: Vec<String> = index_words("<p>An Apple a DAY</p>").collect();
        assert_eq!(words, vec!["apple", "day"]);
    }

    #[test]
    fn unterminated_tag_hides_rest() {
        let words: Vec<String> = index_words("visible <broken tag text").collect();
        assert_eq!(words, vec!["visible"]);
    }
}
