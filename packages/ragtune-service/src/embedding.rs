use ragtune_tokenize::TokenCodec;

use crate::{EmbeddingProvider, Error, Result};

/// Query vectors plus content vectors in the ragged shape of the input contents.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryContentEmbeddings {
	pub queries: Vec<Vec<f32>>,
	pub contents: Vec<Vec<Vec<f32>>>,
}

#[derive(Clone, Debug)]
pub struct EmbeddingPipeline {
	batch_size: usize,
	max_concurrent_batches: usize,
	token_limit: Option<usize>,
}
impl EmbeddingPipeline {
	pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Result<Self> {
		if batch_size == 0 || max_concurrent_batches == 0 {
			return Err(Error::InvalidRequest {
				message: "batch_size and max_concurrent_batches must be greater than zero."
					.to_string(),
			});
		}

		Ok(Self { batch_size, max_concurrent_batches, token_limit: None })
	}

	pub fn from_config(cfg: &ragtune_config::Embedding) -> Result<Self> {
		Ok(Self::new(cfg.batch_size, cfg.max_concurrent_batches)?.with_token_limit(cfg.token_limit))
	}

	/// Caps every input at `limit` tokens, taking precedence over the provider's own cap.
	pub fn with_token_limit(mut self, limit: Option<usize>) -> Self {
		self.token_limit = limit;

		self
	}

	/// Embeds `texts` in chunks of `batch_size`, keeping at most `max_concurrent_batches` provider
	/// calls in flight.
	pub async fn embed_texts<P>(&self, provider: &P, texts: &[String]) -> Result<Vec<Vec<f32>>>
	where
		P: EmbeddingProvider + ?Sized,
	{
		let chunks = ragtune_ragged::make_batches(texts.to_vec(), self.batch_size)?;
		let tasks: Vec<_> = chunks
			.iter()
			.map(|chunk| async move {
				let vectors = provider.embed(chunk).await?;

				if vectors.len() != chunk.len() {
					return Err(Error::Provider {
						message: format!(
							"Provider returned {} vectors for {} texts.",
							vectors.len(),
							chunk.len()
						),
					});
				}

				Ok::<_, Error>(vectors)
			})
			.collect();
		let embedded = ragtune_executor::run_batched(tasks, self.max_concurrent_batches).await?;

		Ok(embedded.into_iter().flatten().collect())
	}

	/// Embeds `queries` and the ragged `contents`, returning content vectors in the same shape.
	///
	/// When a token limit applies (configured, or the provider's own cap), inputs are truncated
	/// with `tokenizer` first. Without a tokenizer they are sent as they are.
	pub async fn embed_query_and_content<P>(
		&self,
		provider: &P,
		tokenizer: Option<&dyn TokenCodec>,
		queries: &[String],
		contents: Vec<Vec<String>>,
	) -> Result<QueryContentEmbeddings>
	where
		P: EmbeddingProvider + ?Sized,
	{
		let lengths: Vec<usize> = contents.iter().map(Vec::len).collect();
		let (mut flat_contents, _) = ragtune_ragged::flatten(contents);
		let mut queries = queries.to_vec();

		if let Some(limit) = self.token_limit.or_else(|| provider.max_input_tokens()) {
			match tokenizer {
				Some(codec) => {
					queries = ragtune_tokenize::truncate_to_token_budget(&queries, limit, codec)?;
					flat_contents =
						ragtune_tokenize::truncate_to_token_budget(&flat_contents, limit, codec)?;
				},
				None => tracing::warn!(limit, "Token limit applies but no tokenizer was supplied."),
			}
		}

		let query_vectors = self.embed_texts(provider, &queries).await?;
		let flat_vectors = self.embed_texts(provider, &flat_contents).await?;
		let contents = ragtune_ragged::reconstruct_by_lengths(flat_vectors, &lengths)?;

		tracing::debug!(
			queries = query_vectors.len(),
			contents = flat_contents.len(),
			rows = lengths.len(),
			"Embedded queries and contents."
		);

		Ok(QueryContentEmbeddings { queries: query_vectors, contents })
	}
}
