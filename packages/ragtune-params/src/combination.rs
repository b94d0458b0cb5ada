use crate::{ParamMap, ParamValue};

/// Expands a parameter space into every concrete assignment.
///
/// A `List` value is the candidate set for its key; any other value is a single candidate.
/// Duplicates are dropped per key (first occurrence wins) unless some candidate is unhashable,
/// in which case the list is used as given. Assignments follow the key order of `space`, with
/// the last key varying fastest.
pub fn expand(space: &ParamMap) -> Vec<ParamMap> {
	let mut combinations = vec![ParamMap::new()];

	for (key, value) in space.iter() {
		let candidates = dedup(candidates(value));
		let mut next = Vec::with_capacity(combinations.len() * candidates.len());

		for partial in &combinations {
			for candidate in &candidates {
				let mut assignment = partial.clone();

				assignment.insert(key, (*candidate).clone());
				next.push(assignment);
			}
		}

		combinations = next;
	}

	combinations
}

fn candidates(value: &ParamValue) -> Vec<&ParamValue> {
	match value {
		ParamValue::List(items) => items.iter().collect(),
		other => vec![other],
	}
}

fn dedup(candidates: Vec<&ParamValue>) -> Vec<&ParamValue> {
	if !candidates.iter().all(|candidate| candidate.is_hashable()) {
		return candidates;
	}

	let mut unique: Vec<&ParamValue> = Vec::with_capacity(candidates.len());

	for candidate in candidates {
		if !unique.contains(&candidate) {
			unique.push(candidate);
		}
	}

	unique
}

#[cfg(test)]
mod tests {
	use super::*;

	fn space(entries: Vec<(&str, ParamValue)>) -> ParamMap {
		entries.into_iter().collect()
	}

	#[test]
	fn scalar_values_are_single_candidates() {
		let combos = expand(&space(vec![("top_k", 3_i64.into()), ("module", "bm25".into())]));

		assert_eq!(combos, vec![space(vec![("top_k", 3_i64.into()), ("module", "bm25".into())])]);
	}

	#[test]
	fn empty_space_yields_one_empty_assignment() {
		assert_eq!(expand(&ParamMap::new()), vec![ParamMap::new()]);
	}

	#[test]
	fn empty_candidate_list_yields_nothing() {
		let combos =
			expand(&space(vec![("a", vec![1_i64].into()), ("b", ParamValue::List(Vec::new()))]));

		assert!(combos.is_empty());
	}

	#[test]
	fn unhashable_candidates_are_kept_as_given() {
		let nested = ParamValue::List(vec![1_i64.into()]);
		let combos =
			expand(&space(vec![("a", ParamValue::List(vec![nested.clone(), nested.clone()]))]));

		assert_eq!(combos.len(), 2);
		assert!(combos.iter().all(|combo| combo.get("a") == Some(&nested)));
	}

	#[test]
	fn tuples_are_single_values_and_deduplicated() {
		let pair = ParamValue::Tuple(vec![0.3.into(), 0.7.into()]);
		let combos = expand(&space(vec![(
			"weights",
			ParamValue::List(vec![pair.clone(), pair.clone(), ParamValue::Tuple(Vec::new())]),
		)]));

		assert_eq!(combos.len(), 2);
		assert_eq!(combos[0].get("weights"), Some(&pair));
	}
}
