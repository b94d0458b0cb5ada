//! Deterministic stand-ins for the external collaborators used in integration tests.

use std::{
	sync::{
		Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use ahash::AHashMap;
use color_eyre::eyre;
use tokenizers::{
	Tokenizer, models::wordlevel::WordLevel, pre_tokenizers::whitespace::Whitespace,
};

use ragtune_service::{BoxFuture, EmbeddingProvider};

/// Builds a whitespace tokenizer that maps `words` to ids `1..` and everything else to `<unk>`.
pub fn word_level_tokenizer(words: &[&str]) -> color_eyre::Result<Tokenizer> {
	let mut vocab = AHashMap::new();

	vocab.insert("<unk>".to_string(), 0_u32);

	for (id, word) in (1_u32..).zip(words) {
		vocab.insert(word.to_string(), id);
	}

	let model = WordLevel::builder()
		.vocab(vocab)
		.unk_token("<unk>".to_string())
		.build()
		.map_err(|err| eyre::eyre!("Failed to build test tokenizer: {err}."))?;
	let mut tokenizer = Tokenizer::new(model);

	tokenizer.with_pre_tokenizer(Some(Whitespace));

	Ok(tokenizer)
}

/// The vector [`FakeEmbedder`] returns for `text`: character count and word count.
pub fn fake_vector(text: &str) -> Vec<f32> {
	vec![text.chars().count() as f32, text.split_whitespace().count() as f32]
}

/// Records every call and answers with [`fake_vector`].
#[derive(Debug, Default)]
pub struct FakeEmbedder {
	max_input_tokens: Option<usize>,
	delay: Duration,
	fail_on_call: Option<usize>,
	short_by_one: bool,
	calls: Mutex<Vec<Vec<String>>>,
	in_flight: AtomicUsize,
	peak_in_flight: AtomicUsize,
}
impl FakeEmbedder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_max_input_tokens(mut self, limit: usize) -> Self {
		self.max_input_tokens = Some(limit);

		self
	}

	/// Holds every call open for `delay` so overlapping calls can be observed.
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = delay;

		self
	}

	/// Fails the call with this zero-based sequence number.
	pub fn failing_on_call(mut self, call: usize) -> Self {
		self.fail_on_call = Some(call);

		self
	}

	/// Returns one vector fewer than requested on every call.
	pub fn short_by_one(mut self) -> Self {
		self.short_by_one = true;

		self
	}

	/// Texts received by each call, in call order.
	pub fn calls(&self) -> Vec<Vec<String>> {
		self.calls.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn call_sizes(&self) -> Vec<usize> {
		self.calls().iter().map(Vec::len).collect()
	}

	pub fn peak_in_flight(&self) -> usize {
		self.peak_in_flight.load(Ordering::SeqCst)
	}
}
impl EmbeddingProvider for FakeEmbedder {
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			let call = {
				let mut calls = self.calls.lock().unwrap_or_else(|err| err.into_inner());

				calls.push(texts.to_vec());

				calls.len() - 1
			};
			let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;

			self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

			if !self.delay.is_zero() {
				tokio::time::sleep(self.delay).await;
			}

			self.in_flight.fetch_sub(1, Ordering::SeqCst);

			if self.fail_on_call == Some(call) {
				return Err(eyre::eyre!("Fake provider failed on call {call}."));
			}

			let mut vectors: Vec<Vec<f32>> = texts.iter().map(|text| fake_vector(text)).collect();

			if self.short_by_one {
				vectors.pop();
			}

			Ok(vectors)
		})
	}

	fn max_input_tokens(&self) -> Option<usize> {
		self.max_input_tokens
	}
}
