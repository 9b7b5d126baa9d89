//! Turns free text into weighted words for the layout.
//!
//! Tokens follow `\w[\w']*`. Possessive `'s` is stripped, numbers and stop words
//! are dropped, case variants are counted together and shown in their most
//! common spelling, and a plural is folded into its singular when both occur.

use crate::render::StopWords;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w[\w']*").expect("valid token pattern"));

/// A word and its count relative to the most frequent word (0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedWord {
    pub word: String,
    pub count: usize,
    pub weight: f32,
}

/// Count displayable words in `text`, keyed by their display spelling
pub fn count_words(text: &str, stop_words: &StopWords) -> BTreeMap<String, usize> {
    // lowercase key -> surface spelling -> count
    let mut variants: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();

    for token in TOKEN.find_iter(text) {
        let mut word = token.as_str();
        if word.ends_with("'s") || word.ends_with("'S") {
            word = &word[..word.len() - 2];
        }
        if word.is_empty() || word.chars().all(char::is_numeric) || stop_words.contains(word) {
            continue;
        }

        *variants
            .entry(word.to_lowercase())
            .or_default()
            .entry(word.to_string())
            .or_insert(0) += 1;
    }

    fold_plurals(&mut variants);

    variants
        .into_values()
        .filter_map(|spellings| {
            let total: usize = spellings.values().sum();
            // BTreeMap order makes ties resolve to the lexicographically first spelling
            let display = spellings
                .into_iter()
                .fold(None::<(String, usize)>, |best, (spelling, count)| match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((spelling, count)),
                })?
                .0;
            Some((display, total))
        })
        .collect()
}

fn fold_plurals(variants: &mut BTreeMap<String, BTreeMap<String, usize>>) {
    let plurals: Vec<String> = variants
        .keys()
        .filter(|key| key.ends_with('s') && !key.ends_with("ss"))
        .filter(|key| variants.contains_key(&key[..key.len() - 1]))
        .cloned()
        .collect();

    for plural in plurals {
        let Some(plural_spellings) = variants.remove(&plural) else {
            continue;
        };
        let Some(singular_spellings) = variants.get_mut(&plural[..plural.len() - 1]) else {
            continue;
        };
        for (spelling, count) in plural_spellings {
            let singular = spelling[..spelling.len() - 1].to_string();
            *singular_spellings.entry(singular).or_insert(0) += count;
        }
    }
}

/// Keep the `max_words` most frequent words (ties broken alphabetically) and
/// normalise their counts against the most frequent one.
pub fn top_words(counts: BTreeMap<String, usize>, max_words: usize) -> Vec<WeightedWord> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().filter(|(_, c)| *c > 0).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(max_words);

    let max_count = match ranked.first() {
        Some((_, count)) => *count as f32,
        None => return Vec::new(),
    };

    ranked
        .into_iter()
        .map(|(word, count)| WeightedWord {
            weight: count as f32 / max_count,
            word,
            count,
        })
        .collect()
}
