//! Per-query retrieval rows: aligned contents, ids, and scores.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredRow<C, I> {
	pub contents: Vec<C>,
	pub ids: Vec<I>,
	pub scores: Vec<f64>,
}
impl<C, I> ScoredRow<C, I> {
	pub fn new(contents: Vec<C>, ids: Vec<I>, scores: Vec<f64>) -> Result<Self> {
		for (column, actual) in [("contents", contents.len()), ("ids", ids.len())] {
			if actual != scores.len() {
				return Err(Error::MisalignedColumns { column, expected: scores.len(), actual });
			}
		}

		Ok(Self { contents, ids, scores })
	}

	pub fn len(&self) -> usize {
		self.scores.len()
	}

	pub fn is_empty(&self) -> bool {
		self.scores.is_empty()
	}

	/// Reorders all three columns by score. Ties keep their original order.
	pub fn sort_by_scores(self, descending: bool) -> Self {
		let mut entries: Vec<(C, I, f64)> = self
			.contents
			.into_iter()
			.zip(self.ids)
			.zip(self.scores)
			.map(|((content, id), score)| (content, id, score))
			.collect();

		if descending {
			entries.sort_by(|a, b| b.2.total_cmp(&a.2));
		} else {
			entries.sort_by(|a, b| a.2.total_cmp(&b.2));
		}

		let mut sorted = Self {
			contents: Vec::with_capacity(entries.len()),
			ids: Vec::with_capacity(entries.len()),
			scores: Vec::with_capacity(entries.len()),
		};

		for (content, id, score) in entries {
			sorted.contents.push(content);
			sorted.ids.push(id);
			sorted.scores.push(score);
		}

		sorted
	}

	/// Keeps at most the first `k` entries of every column.
	pub fn truncate(&mut self, k: usize) {
		self.contents.truncate(k);
		self.ids.truncate(k);
		self.scores.truncate(k);
	}
}

/// Builds a row from aligned columns and sorts it by score.
pub fn sort_by_scores<C, I>(
	contents: Vec<C>,
	ids: Vec<I>,
	scores: Vec<f64>,
	descending: bool,
) -> Result<ScoredRow<C, I>> {
	Ok(ScoredRow::new(contents, ids, scores)?.sort_by_scores(descending))
}

/// Truncates every row to at most `k` entries.
pub fn select_top_k<T>(rows: Vec<Vec<T>>, k: usize) -> Vec<Vec<T>> {
	rows.into_iter()
		.map(|mut row| {
			row.truncate(k);

			row
		})
		.collect()
}
