//! Answer normalization used when comparing generated text against ground truth.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::Result;

const ARTICLES: &str = r"\b(a|an|the)\b";

/// SQuAD-style normalization: lowercase, drop ASCII punctuation, drop English articles, and
/// collapse whitespace.
pub fn normalize_answer(text: &str) -> Result<String> {
	let lowered = text.to_lowercase();
	let without_punctuation: String =
		lowered.chars().filter(|ch| !ch.is_ascii_punctuation()).collect();
	let without_articles = Regex::new(ARTICLES)?.replace_all(&without_punctuation, " ");

	Ok(without_articles.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Canonical composition (NFC).
pub fn normalize_unicode(text: &str) -> String {
	text.nfc().collect()
}
