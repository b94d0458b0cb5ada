use serde::Deserialize;

/// All OpenAI embedding models reject inputs longer than this many tokens.
pub const DEFAULT_OPENAI_TOKEN_LIMIT: usize = 8_191;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub executor: Executor,
	#[serde(default)]
	pub embedding: Embedding,
	#[serde(default)]
	pub corpus: Corpus,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Executor {
	#[serde(default = "default_executor_batch_size")]
	pub batch_size: usize,
}
impl Default for Executor {
	fn default() -> Self {
		Self { batch_size: default_executor_batch_size() }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Embedding {
	/// Texts sent to the provider per call.
	#[serde(default = "default_embedding_batch_size")]
	pub batch_size: usize,
	/// Provider calls allowed in flight at once.
	#[serde(default = "default_max_concurrent_batches")]
	pub max_concurrent_batches: usize,
	/// Optional. Overrides the provider's own input cap when set.
	pub token_limit: Option<usize>,
	/// Optional. Hugging Face repo, or local `tokenizer.json` path, of the truncation tokenizer.
	pub tokenizer_repo: Option<String>,
}
impl Default for Embedding {
	fn default() -> Self {
		Self {
			batch_size: default_embedding_batch_size(),
			max_concurrent_batches: default_max_concurrent_batches(),
			token_limit: None,
			tokenizer_repo: None,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Corpus {
	#[serde(default = "default_id_column")]
	pub id_column: String,
	#[serde(default = "default_content_column")]
	pub content_column: String,
}
impl Default for Corpus {
	fn default() -> Self {
		Self { id_column: default_id_column(), content_column: default_content_column() }
	}
}

fn default_executor_batch_size() -> usize {
	64
}

fn default_embedding_batch_size() -> usize {
	128
}

fn default_max_concurrent_batches() -> usize {
	1
}

fn default_id_column() -> String {
	"doc_id".to_string()
}

fn default_content_column() -> String {
	"contents".to_string()
}
