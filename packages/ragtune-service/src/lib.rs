//! Ragged retrieval data against external collaborators: corpus lookups and embeddings.

pub mod columns;
pub mod corpus;
pub mod embedding;
pub mod resolve;

mod error;

pub use columns::{Columns, tabulate, to_columns};
pub use corpus::MemoryCorpus;
pub use embedding::{EmbeddingPipeline, QueryContentEmbeddings};
pub use error::{Error, Result};
pub use resolve::{resolve_many, resolve_one};

use std::{future::Future, pin::Pin};

use serde_json::{Map, Value};

use ragtune_config::Config;
use ragtune_tokenize::{TokenCodec, Tokenizer};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One corpus row: column name to value.
pub type Row = Map<String, Value>;

/// Batched embedding call: one vector per input text, in input order.
pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;

	/// The longest input, in tokens, the provider accepts.
	fn max_input_tokens(&self) -> Option<usize> {
		None
	}
}

/// Lookup of rows by primary key.
pub trait KeyedStore
where
	Self: Send + Sync,
{
	/// Returns, for each id, the first row whose primary key equals it, or `None` when no row does.
	fn fetch(&self, ids: &[&str]) -> Result<Vec<Option<Row>>>;
}

/// The corpus, embedding pipeline, and optional truncation tokenizer described by one config.
pub struct RagtuneService {
	pub cfg: Config,
	pub corpus: MemoryCorpus,
	pub pipeline: EmbeddingPipeline,
	pub tokenizer: Option<Tokenizer>,
}
impl RagtuneService {
	/// Indexes `rows` by `corpus.id_column` and loads `embedding.tokenizer_repo` when it is set.
	pub fn new(cfg: Config, rows: Vec<Row>) -> Result<Self> {
		let corpus = MemoryCorpus::from_config(&cfg.corpus, rows);
		let pipeline = EmbeddingPipeline::from_config(&cfg.embedding)?;
		let tokenizer = cfg
			.embedding
			.tokenizer_repo
			.as_deref()
			.map(ragtune_tokenize::load_tokenizer)
			.transpose()?;

		tracing::debug!(
			rows = corpus.len(),
			tokenizer = tokenizer.is_some(),
			"Service initialized."
		);

		Ok(Self { cfg, corpus, pipeline, tokenizer })
	}

	/// Resolves ids to the configured `corpus.content_column`.
	pub fn resolve_contents(&self, ids: Vec<Vec<String>>) -> Result<Vec<Vec<Option<Value>>>> {
		resolve_many(&self.corpus, ids, &self.cfg.corpus.content_column)
	}

	pub async fn embed<P>(
		&self,
		provider: &P,
		queries: &[String],
		contents: Vec<Vec<String>>,
	) -> Result<QueryContentEmbeddings>
	where
		P: EmbeddingProvider + ?Sized,
	{
		let tokenizer = self.tokenizer.as_ref().map(|tokenizer| tokenizer as &dyn TokenCodec);

		self.pipeline.embed_query_and_content(provider, tokenizer, queries, contents).await
	}
}
