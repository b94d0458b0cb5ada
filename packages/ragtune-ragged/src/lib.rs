//! Shape-preserving operations over ragged (variable-length) row collections.
//!
//! Row identity is a row's position in the outer sequence and element identity is the position
//! inside its row. Every function here keeps both.

mod error;

pub use error::{Error, FlattenApplyError, Result};

use std::collections::HashMap;

/// Flattens `rows` into one sequence, returning the values and the originating row of each.
///
/// Empty rows contribute nothing, so `flatten` followed by [`reconstruct_by_lengths`] with the
/// original row lengths is the identity.
pub fn flatten<T>(rows: Vec<Vec<T>>) -> (Vec<T>, Vec<usize>) {
	let total = rows.iter().map(Vec::len).sum();
	let mut flat = Vec::with_capacity(total);
	let mut indices = Vec::with_capacity(total);

	for (row_index, row) in rows.into_iter().enumerate() {
		indices.extend(std::iter::repeat_n(row_index, row.len()));
		flat.extend(row);
	}

	(flat, indices)
}

/// Pairs every element of `rows` with the index value of its row.
///
/// An empty row still yields one `(index, None)` pair so the row survives a later regroup.
pub fn explode<I, T>(index_values: Vec<I>, rows: Vec<Vec<T>>) -> Result<(Vec<I>, Vec<Option<T>>)>
where
	I: Clone,
{
	if index_values.len() != rows.len() {
		return Err(Error::LengthMismatch { expected: index_values.len(), actual: rows.len() });
	}

	let total = rows.iter().map(|row| row.len().max(1)).sum();
	let mut exploded_index = Vec::with_capacity(total);
	let mut exploded_values = Vec::with_capacity(total);

	for (index, row) in index_values.into_iter().zip(rows) {
		if row.is_empty() {
			exploded_index.push(index);
			exploded_values.push(None);

			continue;
		}

		exploded_index.extend(std::iter::repeat_n(index, row.len()));
		exploded_values.extend(row.into_iter().map(Some));
	}

	Ok((exploded_index, exploded_values))
}

/// Flattens `rows`, calls `transform` once on the whole exploded sequence, and regroups the
/// output by originating row.
///
/// The transform receives `None` for the placeholder of an empty row and must return exactly one
/// value per input value. An empty input row therefore comes back as a one-element row.
pub fn flatten_apply<T, U, E, F>(
	rows: Vec<Vec<T>>,
	transform: F,
) -> Result<Vec<Vec<U>>, FlattenApplyError<E>>
where
	F: FnOnce(Vec<Option<T>>) -> Result<Vec<U>, E>,
{
	let positions = (0..rows.len()).collect();
	let (indices, values) = explode(positions, rows)?;
	let expected = values.len();
	let transformed = transform(values).map_err(FlattenApplyError::Transform)?;

	if transformed.len() != expected {
		return Err(Error::LengthMismatch { expected, actual: transformed.len() }.into());
	}

	Ok(reconstruct_by_index(&indices, transformed)?)
}

/// Regroups `values` by the parallel `indices`.
///
/// Groups are emitted in the order their index is first seen and each group keeps arrival order,
/// so reordered or filtered inputs still land in the right bucket.
pub fn reconstruct_by_index<I, U>(indices: &[I], values: Vec<U>) -> Result<Vec<Vec<U>>>
where
	I: Eq + std::hash::Hash,
{
	if indices.len() != values.len() {
		return Err(Error::LengthMismatch { expected: indices.len(), actual: values.len() });
	}

	let mut bucket_of: HashMap<&I, usize> = HashMap::new();
	let mut buckets: Vec<Vec<U>> = Vec::new();

	for (index, value) in indices.iter().zip(values) {
		let bucket = *bucket_of.entry(index).or_insert_with(|| {
			buckets.push(Vec::new());

			buckets.len() - 1
		});

		buckets[bucket].push(value);
	}

	Ok(buckets)
}

/// Splits `flat` into consecutive rows sized by `lengths`.
pub fn reconstruct_by_lengths<T>(flat: Vec<T>, lengths: &[usize]) -> Result<Vec<Vec<T>>> {
	let declared: usize = lengths.iter().sum();

	if declared != flat.len() {
		return Err(Error::ShapeMismatch { declared, actual: flat.len() });
	}

	let mut rest = flat.into_iter();

	Ok(lengths.iter().map(|&length| rest.by_ref().take(length).collect()).collect())
}

/// Splits `elems` into consecutive batches of `batch_size`; only the last may be shorter.
pub fn make_batches<T>(elems: Vec<T>, batch_size: usize) -> Result<Vec<Vec<T>>> {
	if batch_size == 0 {
		return Err(Error::InvalidBatchSize);
	}

	let mut batches = Vec::with_capacity(elems.len().div_ceil(batch_size));
	let mut rest = elems.into_iter().peekable();

	while rest.peek().is_some() {
		batches.push(rest.by_ref().take(batch_size).collect());
	}

	Ok(batches)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flatten_tracks_row_of_each_element() {
		let (flat, indices) = flatten(vec![vec!["a", "b"], vec![], vec!["c"]]);

		assert_eq!(flat, vec!["a", "b", "c"]);
		assert_eq!(indices, vec![0, 0, 2]);
	}

	#[test]
	fn explode_keeps_a_placeholder_for_empty_rows() {
		let (index, values) =
			explode(vec!["q1", "q2", "q3"], vec![vec![1, 2], vec![], vec![3]]).unwrap();

		assert_eq!(index, vec!["q1", "q1", "q2", "q3"]);
		assert_eq!(values, vec![Some(1), Some(2), None, Some(3)]);
	}

	#[test]
	fn explode_rejects_misaligned_sequences() {
		let err = explode(vec![0, 1], vec![vec![1]]).unwrap_err();

		assert_eq!(err, Error::LengthMismatch { expected: 2, actual: 1 });
	}

	#[test]
	fn flatten_apply_calls_transform_once() {
		let mut calls = 0;
		let rows = flatten_apply(vec![vec![1, 2], vec![3], vec![4, 5, 6]], |flat| {
			calls += 1;

			Ok::<_, std::convert::Infallible>(
				flat.into_iter().map(|v| v.map(|v| v * 10)).collect::<Vec<_>>(),
			)
		})
		.unwrap();

		assert_eq!(calls, 1);
		assert_eq!(rows, vec![
			vec![Some(10), Some(20)],
			vec![Some(30)],
			vec![Some(40), Some(50), Some(60)]
		]);
	}

	#[test]
	fn flatten_apply_turns_empty_rows_into_one_placeholder() {
		let rows = flatten_apply(vec![vec!["x"], vec![], vec!["y"]], |flat| {
			Ok::<_, std::convert::Infallible>(flat)
		})
		.unwrap();

		assert_eq!(rows, vec![vec![Some("x")], vec![None], vec![Some("y")]]);
	}

	#[test]
	fn flatten_apply_rejects_transforms_that_change_length() {
		let err = flatten_apply(vec![vec![1, 2]], |mut flat: Vec<Option<i32>>| {
			flat.pop();

			Ok::<_, std::convert::Infallible>(flat)
		})
		.unwrap_err();

		assert!(matches!(
			err,
			FlattenApplyError::Shape(Error::LengthMismatch { expected: 2, actual: 1 })
		));
	}

	#[test]
	fn flatten_apply_propagates_transform_errors() {
		let err = flatten_apply(vec![vec![1]], |_: Vec<Option<i32>>| {
			Err::<Vec<i32>, _>(std::fmt::Error)
		})
		.unwrap_err();

		assert!(matches!(err, FlattenApplyError::Transform(std::fmt::Error)));
	}

	#[test]
	fn reconstruct_by_index_uses_first_seen_order() {
		let rows = reconstruct_by_index(&[2, 0, 2, 1, 0], vec!["a", "b", "c", "d", "e"]).unwrap();

		assert_eq!(rows, vec![vec!["a", "c"], vec!["b", "e"], vec!["d"]]);
	}

	#[test]
	fn reconstruct_by_lengths_rejects_mismatched_shapes() {
		assert_eq!(
			reconstruct_by_lengths(vec![1, 2, 3], &[1, 1]).unwrap_err(),
			Error::ShapeMismatch { declared: 2, actual: 3 }
		);
		assert_eq!(
			reconstruct_by_lengths(vec![1], &[1, 1]).unwrap_err(),
			Error::ShapeMismatch { declared: 2, actual: 1 }
		);
	}

	#[test]
	fn make_batches_rejects_zero() {
		assert_eq!(make_batches(vec![1, 2], 0).unwrap_err(), Error::InvalidBatchSize);
	}
}
