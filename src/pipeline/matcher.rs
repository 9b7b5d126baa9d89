/// Trim and lowercase raw user input; `None` when nothing is left
pub fn normalize_query(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    (!word.is_empty()).then_some(word)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive whole-word matcher.
///
/// An occurrence counts when the characters on either side of it are not word
/// characters (Unicode alphanumerics or `_`), or are the ends of the text. The
/// query itself is matched literally, so "c++" or "state-of-the-art" work as
/// typed and "cat" never matches inside "category". Matching is a plain
/// substring scan, so query length is bounded only by the request body.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    word: String,
}

impl WordMatcher {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_lowercase(),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        if self.word.is_empty() {
            return false;
        }

        let haystack = text.to_lowercase();
        let mut from = 0;
        while let Some(offset) = haystack[from..].find(&self.word) {
            let start = from + offset;
            let end = start + self.word.len();

            let before = haystack[..start].chars().next_back();
            let after = haystack[end..].chars().next();
            if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
                return true;
            }

            // Retry one character further on; hits may overlap
            from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(word: &str, text: &str) -> bool {
        WordMatcher::new(word).is_match(text)
    }

    #[test]
    fn normalizes_and_rejects_blank_input() {
        assert_eq!(normalize_query("  CaTs \n"), Some("cats".to_string()));
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query(" \t "), None);
    }

    #[test]
    fn matches_whole_words_only() {
        assert!(!matches("cat", "Category theory"));
        assert!(matches("category", "Category theory"));
        assert!(matches("theory", "Category theory"));
        assert!(!matches("dog", "Dogs only"));
    }

    #[test]
    fn ignores_case_of_document_text() {
        assert!(matches("cats", "CATS are mammals"));
        assert!(matches("cats", "Cats are mammals"));
    }

    #[test]
    fn punctuation_and_hyphens_are_boundaries() {
        assert!(matches("cats", "We study cats."));
        assert!(matches("state", "state-of-the-art results"));
        assert!(matches("don", "don't"));
        assert!(!matches("state", "statement"));
    }

    #[test]
    fn query_characters_are_literal() {
        assert!(matches("c++", "Fast C++ templates"));
        assert!(!matches("c++", "c++x"));
        assert!(!matches("a.c", "abc"));
        assert!(matches("a.c", "see a.c here"));
    }

    #[test]
    fn underscore_is_a_word_character() {
        assert!(!matches("rate", "learning_rate"));
    }

    #[test]
    fn overlapping_occurrences_are_all_tried() {
        assert!(matches("aa", "aaa aa"));
        assert!(!matches("aa", "aaa"));
    }

    #[test]
    fn very_long_query_is_just_a_miss() {
        let word = "a".repeat(200_000);
        assert!(!matches(&word, "a short abstract"));
        assert!(matches(&word, &format!("x {word} y")));
    }
}
