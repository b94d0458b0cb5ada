use std::{env, fs, process};

use ragtune_testkit::word_level_tokenizer;
use ragtune_tokenize::{Error, TokenCodec, Tokenizer, load_tokenizer, truncate_to_token_budget};

fn test_tokenizer(words: &[&str]) -> Tokenizer {
	word_level_tokenizer(words).expect("Failed to build test tokenizer.")
}

#[test]
fn truncates_only_texts_over_budget() {
	let tokenizer = test_tokenizer(&["alpha", "beta", "charlie", "delta"]);
	let texts = vec![
		"alpha beta charlie delta".to_string(),
		"alpha  beta".to_string(),
		String::new(),
	];
	let truncated =
		truncate_to_token_budget(&texts, 2, &tokenizer).expect("Failed to truncate texts.");

	assert_eq!(truncated, vec!["alpha beta".to_string(), "alpha  beta".to_string(), String::new()]);
}

#[test]
fn truncation_is_deterministic() {
	let tokenizer = test_tokenizer(&["alpha", "beta", "charlie"]);
	let texts = vec!["charlie beta alpha charlie".to_string()];
	let first = truncate_to_token_budget(&texts, 3, &tokenizer).expect("Failed to truncate.");
	let second = truncate_to_token_budget(&texts, 3, &tokenizer).expect("Failed to truncate.");

	assert_eq!(first, second);
	assert_eq!(first, vec!["charlie beta alpha".to_string()]);
}

#[test]
fn works_through_a_trait_object() {
	let tokenizer = test_tokenizer(&["alpha", "beta"]);
	let codec: &dyn TokenCodec = &tokenizer;
	let ids = codec.encode("beta alpha").expect("Failed to encode.");

	assert_eq!(ids.len(), 2);
	assert_eq!(codec.decode(&ids[..1]).expect("Failed to decode."), "beta");
}

#[test]
fn loads_a_tokenizer_file_from_disk() {
	let path = env::temp_dir().join(format!("ragtune_tokenizer_{}.json", process::id()));

	test_tokenizer(&["alpha", "beta"]).save(&path, false).expect("Failed to save tokenizer.");

	let loaded = load_tokenizer(&path.to_string_lossy());

	fs::remove_file(&path).expect("Failed to remove tokenizer file.");

	let truncated = truncate_to_token_budget(&["beta alpha beta".to_string()], 1, &loaded.unwrap())
		.expect("Failed to truncate.");

	assert_eq!(truncated, vec!["beta".to_string()]);
}

#[test]
fn unreadable_tokenizer_files_fail_to_load() {
	let path = env::temp_dir().join(format!("ragtune_tokenizer_broken_{}.json", process::id()));

	fs::write(&path, "{ not json").expect("Failed to write tokenizer file.");

	let loaded = load_tokenizer(&path.to_string_lossy());

	fs::remove_file(&path).expect("Failed to remove tokenizer file.");

	assert!(matches!(loaded, Err(Error::Load { .. })));
}
