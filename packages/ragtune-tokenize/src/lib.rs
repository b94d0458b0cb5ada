pub use tokenizers::Tokenizer;

use std::path::Path;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to load tokenizer {repo}: {message}")]
	Load { repo: String, message: String },
	#[error("Tokenizer failed to encode text: {message}")]
	Encode { message: String },
	#[error("Tokenizer failed to decode tokens: {message}")]
	Decode { message: String },
}

/// Text to token ids and back, deterministic for a fixed vocabulary.
pub trait TokenCodec
where
	Self: Send + Sync,
{
	fn encode(&self, text: &str) -> Result<Vec<u32>>;

	fn decode(&self, tokens: &[u32]) -> Result<String>;
}

// The inherent methods live on the dereferenced `TokenizerImpl`.
impl TokenCodec for Tokenizer {
	fn encode(&self, text: &str) -> Result<Vec<u32>> {
		let encoding = (**self)
			.encode(text, false)
			.map_err(|err| Error::Encode { message: err.to_string() })?;

		Ok(encoding.get_ids().to_vec())
	}

	fn decode(&self, tokens: &[u32]) -> Result<String> {
		(**self).decode(tokens, true).map_err(|err| Error::Decode { message: err.to_string() })
	}
}

/// Loads `repo` as a local `tokenizer.json` when such a file exists, otherwise from the
/// Hugging Face hub.
pub fn load_tokenizer(repo: &str) -> Result<Tokenizer> {
	let loaded = if Path::new(repo).is_file() {
		Tokenizer::from_file(repo)
	} else {
		Tokenizer::from_pretrained(repo, None)
	};

	loaded.map_err(|err| Error::Load { repo: repo.to_string(), message: err.to_string() })
}

/// Cuts every text down to its first `limit` tokens; texts within budget are returned untouched.
pub fn truncate_to_token_budget<C>(texts: &[String], limit: usize, codec: &C) -> Result<Vec<String>>
where
	C: TokenCodec + ?Sized,
{
	texts.iter().map(|text| truncate_text(text, limit, codec)).collect()
}

fn truncate_text<C>(text: &str, limit: usize, codec: &C) -> Result<String>
where
	C: TokenCodec + ?Sized,
{
	let tokens = codec.encode(text).inspect_err(|err| {
		tracing::error!(error = %err, "Tokenizer failed to encode text for truncation.");
	})?;

	if tokens.len() <= limit {
		return Ok(text.to_string());
	}

	codec.decode(&tokens[..limit])
}
