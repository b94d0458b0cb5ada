mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Corpus, DEFAULT_OPENAI_TOKEN_LIMIT, Embedding, Executor, Service};

use std::{fs, path::Path};

/// Reads the TOML file at `path` and returns the normalized, validated config.
pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|source| Error::Read { path: path.to_path_buf(), source })?;

	parse(&raw)
}

/// Same as [`load`] for TOML already in memory.
pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg = toml::from_str::<Config>(raw)?;

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.executor.batch_size == 0 {
		return Err(Error::Validation {
			message: "executor.batch_size must be greater than zero.".to_string(),
		});
	}
	if cfg.embedding.batch_size == 0 {
		return Err(Error::Validation {
			message: "embedding.batch_size must be greater than zero.".to_string(),
		});
	}
	if cfg.embedding.max_concurrent_batches == 0 {
		return Err(Error::Validation {
			message: "embedding.max_concurrent_batches must be greater than zero.".to_string(),
		});
	}

	if let Some(limit) = cfg.embedding.token_limit
		&& limit == 0
	{
		return Err(Error::Validation {
			message: "embedding.token_limit must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("corpus.id_column", &cfg.corpus.id_column),
		("corpus.content_column", &cfg.corpus.content_column),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.embedding.tokenizer_repo.as_deref().map(|repo| repo.trim().is_empty()).unwrap_or(false)
	{
		cfg.embedding.tokenizer_repo = None;
	}
}
