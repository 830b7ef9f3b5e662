// File: src/core/tokenizer.rs
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Tokens shorter than this many characters are dropped.
const MIN_TOKEN_CHARS: usize = 3;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had",
    "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her",
    "here", "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd",
    "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself",
    "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off",
    "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some",
    "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then",
    "there", "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "will", "with", "won't",
    "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours", "yourself",
    "yourselves",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

// Anything that is not a word character, whitespace or an apostrophe.
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s']").expect("static pattern is valid"));

// Tokens made only of decimal digits (Unicode Nd) are dropped. Other numeric
// characters such as roman numerals or CJK numerals are kept.
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("static pattern is valid"));

/// Deterministic text normalizer producing bag-of-words tokens.
///
/// `tokenize` is applied to ad hoc inference text. `tokenize_document`
/// additionally drops the leading header block of a corpus file and is only
/// used when loading training data.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Lowercases, collapses punctuation and filters stopwords, short
    /// words and pure numbers. Never fails.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let cleaned = NON_WORD.replace_all(&lowered, " ");
        cleaned
            .split_whitespace()
            .filter(|word| is_content_word(word))
            .map(str::to_owned)
            .collect()
    }

    /// Training-time variant: strips the metadata header first.
    pub fn tokenize_document(&self, text: &str) -> Vec<String> {
        self.tokenize(strip_metadata(text))
    }

    /// Rejoins tokens with single spaces.
    pub fn join(tokens: &[String]) -> String {
        tokens.join(" ")
    }
}

/// Returns everything after the first blank line, or the whole text when
/// there is no blank line.
pub fn strip_metadata(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split('\n') {
        let next = offset + line.len() + 1;
        if line.trim().is_empty() {
            return text.get(next..).unwrap_or("");
        }
        offset = next;
    }
    text
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

fn is_content_word(word: &str) -> bool {
    word.chars().count() >= MIN_TOKEN_CHARS
        && !is_stopword(word)
        && !DIGITS.is_match(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_drops_punctuation() {
        let tokens = Tokenizer::new().tokenize("Hello, World! NASA's rocket-launch.");
        assert_eq!(tokens, vec!["hello", "world", "nasa's", "rocket", "launch"]);
    }

    #[test]
    fn drops_stopwords_short_words_and_numbers() {
        let tokens = Tokenizer::new().tokenize("I don't think we can go to 1993 or 42 ok");
        assert_eq!(tokens, vec!["think"]);
    }

    #[test]
    fn keeps_mixed_alphanumeric_tokens() {
        let tokens = Tokenizer::new().tokenize("the 486dx and 2000 chips");
        assert_eq!(tokens, vec!["486dx", "chips"]);
    }

    #[test]
    fn only_decimal_digit_tokens_count_as_numbers() {
        let tokens = Tokenizer::new().tokenize("ⅻⅻⅻ ⅷⅷⅷ 三四五 ٣٤٥ １２３");
        assert_eq!(tokens, vec!["ⅻⅻⅻ", "ⅷⅷⅷ", "三四五"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(Tokenizer::new().tokenize("").is_empty());
        assert!(Tokenizer::new().tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn retokenizing_processed_text_is_stable() {
        let tokenizer = Tokenizer::new();
        let input = "Re: The Mets' pitching (again)!! -- 3 games, 2 wins; Gooden's arm?";
        let tokens = tokenizer.tokenize(input);
        let processed = Tokenizer::join(&tokens);
        assert_eq!(tokenizer.tokenize(&processed), tokens);
    }

    #[test]
    fn strip_metadata_removes_header_block() {
        let doc = "From: someone@example.com\nSubject: orbit\n\nThe shuttle launch slipped.";
        assert_eq!(strip_metadata(doc), "The shuttle launch slipped.");
    }

    #[test]
    fn strip_metadata_without_blank_line_is_identity() {
        let doc = "no header here\njust two lines";
        assert_eq!(strip_metadata(doc), doc);
    }

    #[test]
    fn strip_metadata_treats_whitespace_line_as_blank() {
        assert_eq!(strip_metadata("a\n  \t\nbody"), "body");
        assert_eq!(strip_metadata("header\n"), "");
        assert_eq!(strip_metadata(""), "");
    }

    #[test]
    fn training_and_inference_tokenization_differ_on_blank_lines() {
        let tokenizer = Tokenizer::new();
        let text = "hockey playoffs tonight\n\ngoalie saves everything";
        assert_eq!(
            tokenizer.tokenize(text),
            vec!["hockey", "playoffs", "tonight", "goalie", "saves", "everything"]
        );
        assert_eq!(
            tokenizer.tokenize_document(text),
            vec!["goalie", "saves", "everything"]
        );
    }
}
