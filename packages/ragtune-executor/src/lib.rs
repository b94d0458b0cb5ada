//! Batch-synchronous execution of independent fallible futures.

use std::future::Future;

use futures_util::{TryFutureExt, future};

pub type Result<T, E> = std::result::Result<T, Error<E>>;

#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
	#[error("batch_size must be greater than zero.")]
	InvalidBatchSize,
	#[error("Task {index} failed.")]
	TaskFailure {
		index: usize,
		#[source]
		source: E,
	},
}

/// Runs `tasks` in consecutive batches of `batch_size`, returning results in submission order.
///
/// Every task in a batch is polled concurrently and the next batch starts only after the whole
/// batch has finished, so at most `batch_size` tasks are in flight. The first failure drops the
/// rest of its batch, starts no further batches, and is returned as [`Error::TaskFailure`].
pub async fn run_batched<F, T, E>(tasks: Vec<F>, batch_size: usize) -> Result<Vec<T>, E>
where
	F: Future<Output = std::result::Result<T, E>>,
{
	let indexed = tasks
		.into_iter()
		.enumerate()
		.map(|(index, task)| task.map_err(move |source| Error::TaskFailure { index, source }))
		.collect();
	let batches = ragtune_ragged::make_batches(indexed, batch_size)
		.map_err(|_| Error::InvalidBatchSize)?;
	let total = batches.len();
	let mut results = Vec::new();

	for (batch_index, batch) in batches.into_iter().enumerate() {
		let completed = future::try_join_all(batch).await?;

		results.extend(completed);

		tracing::debug!(
			batch = batch_index + 1,
			batches = total,
			completed = results.len(),
			"Batch finished."
		);
	}

	Ok(results)
}
