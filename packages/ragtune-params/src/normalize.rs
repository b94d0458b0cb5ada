//! In-place and copy-on-write helpers that prepare config maps before expansion.
//!
//! The recursive walkers visit map values and list items that are maps or strings. Strings
//! nested in lists of lists are left alone.

use std::env;

use regex::{Captures, Regex};

use crate::{Error, ParamMap, ParamValue, Result, literal};

const ENV_PLACEHOLDER: &str = r"\$\{(.*?)\}";

/// Replaces every `${NAME}` in string leaves with the process environment value, or `""` when
/// `NAME` is unset.
pub fn substitute_environment(map: &mut ParamMap) -> Result<()> {
	substitute_environment_with(map, |name| env::var(name).ok())
}

/// Like [`substitute_environment`], resolving names through `lookup`.
pub fn substitute_environment_with<F>(map: &mut ParamMap, lookup: F) -> Result<()>
where
	F: Fn(&str) -> Option<String>,
{
	let pattern = Regex::new(ENV_PLACEHOLDER)?;

	walk_strings(map, &mut |text: &mut String| -> Result<Option<ParamValue>> {
		let replaced = pattern
			.replace_all(text, |caps: &Captures| lookup(&caps[1]).unwrap_or_default())
			.into_owned();

		*text = replaced;

		Ok(None)
	})
}

/// Replaces every string leaf wrapped in `(` and `)` with the literal it spells.
///
/// Stops at the first malformed literal; leaves visited before it stay converted.
pub fn coerce_parenthesized_strings(map: &mut ParamMap) -> Result<()> {
	walk_strings(map, &mut |text: &mut String| -> Result<Option<ParamValue>> {
		if text.starts_with('(') && text.ends_with(')') {
			return literal::parse_literal(text).map(Some);
		}

		Ok(None)
	})
}

/// Returns a copy of `map` with `key` bound to `value`, or an unchanged copy when `key` is absent.
pub fn replace_key(map: &ParamMap, key: &str, value: ParamValue) -> ParamMap {
	let mut replaced = map.clone();

	if replaced.contains_key(key) {
		replaced.insert(key, value);
	}

	replaced
}

/// Returns a new map holding only `keys`, in the order given.
pub fn filter_keys(map: &ParamMap, keys: &[&str]) -> Result<ParamMap> {
	keys.iter()
		.map(|&key| {
			map.get(key)
				.map(|value| (key, value.clone()))
				.ok_or_else(|| Error::MissingKey { key: key.to_string() })
		})
		.collect()
}

/// Calls `visit` on each reachable string leaf; `Some(value)` replaces the leaf.
fn walk_strings<F>(map: &mut ParamMap, visit: &mut F) -> Result<()>
where
	F: FnMut(&mut String) -> Result<Option<ParamValue>>,
{
	for value in map.values_mut() {
		match value {
			ParamValue::Map(inner) => walk_strings(inner, visit)?,
			ParamValue::List(items) =>
				for item in items.iter_mut() {
					match item {
						ParamValue::Map(inner) => walk_strings(inner, visit)?,
						ParamValue::Str(_) => visit_leaf(item, visit)?,
						_ => {},
					}
				},
			ParamValue::Str(_) => visit_leaf(value, visit)?,
			_ => {},
		}
	}

	Ok(())
}

fn visit_leaf<F>(leaf: &mut ParamValue, visit: &mut F) -> Result<()>
where
	F: FnMut(&mut String) -> Result<Option<ParamValue>>,
{
	if let ParamValue::Str(text) = leaf
		&& let Some(replacement) = visit(text)?
	{
		*leaf = replacement;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> =
			pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();

		move |name| vars.get(name).cloned()
	}

	#[test]
	fn substitutes_set_and_unset_variables() {
		let mut set: ParamMap = [("x", "prefix-${FOO}-suffix".into())].into_iter().collect();
		let mut unset = set.clone();

		substitute_environment_with(&mut set, lookup_from(&[("FOO", "bar")])).unwrap();
		substitute_environment_with(&mut unset, lookup_from(&[])).unwrap();

		assert_eq!(set.get("x"), Some(&ParamValue::from("prefix-bar-suffix")));
		assert_eq!(unset.get("x"), Some(&ParamValue::from("prefix--suffix")));
	}

	#[test]
	fn substitutes_from_the_process_environment() {
		let name = "RAGTUNE_NORMALIZE_SUBSTITUTION_FOO";
		let mut map: ParamMap =
			[("x", format!("prefix-${{{name}}}-suffix").into())].into_iter().collect();

		// Unique to this test, so no other test reads or writes it.
		unsafe {
			env::set_var(name, "bar");
		}

		let result = substitute_environment(&mut map);

		unsafe {
			env::remove_var(name);
		}

		result.unwrap();

		assert_eq!(map.get("x"), Some(&ParamValue::from("prefix-bar-suffix")));
	}

	#[test]
	fn substitutes_inside_nested_maps_and_lists() {
		let inner: ParamMap = [("key", "${KEY}".into())].into_iter().collect();
		let mut map: ParamMap = [
			("nested", ParamValue::Map(inner.clone())),
			(
				"list",
				ParamValue::List(vec!["${A}/${B}".into(), ParamValue::Map(inner), 3_i64.into()]),
			),
		]
		.into_iter()
		.collect();

		let lookup = lookup_from(&[("KEY", "k"), ("A", "a"), ("B", "b")]);

		substitute_environment_with(&mut map, lookup).unwrap();

		let expected_inner: ParamMap = [("key", "k".into())].into_iter().collect();

		assert_eq!(map.get("nested"), Some(&ParamValue::Map(expected_inner.clone())));
		assert_eq!(
			map.get("list"),
			Some(&ParamValue::List(vec![
				"a/b".into(),
				ParamValue::Map(expected_inner),
				3_i64.into()
			]))
		);
	}

	#[test]
	fn coerces_parenthesized_leaves() {
		let mut map: ParamMap = [
			("weights", "(0.3, 0.7)".into()),
			("plain", "not (a tuple)".into()),
			("items", ParamValue::List(vec!["(1, 2)".into(), "x".into()])),
		]
		.into_iter()
		.collect();

		coerce_parenthesized_strings(&mut map).unwrap();

		assert_eq!(map.get("weights"), Some(&ParamValue::Tuple(vec![0.3.into(), 0.7.into()])));
		assert_eq!(map.get("plain"), Some(&ParamValue::from("not (a tuple)")));
		assert_eq!(
			map.get("items"),
			Some(&ParamValue::List(vec![
				ParamValue::Tuple(vec![1_i64.into(), 2_i64.into()]),
				"x".into()
			]))
		);
	}

	#[test]
	fn malformed_literal_leaves_earlier_leaves_converted() {
		let mut map: ParamMap =
			[("first", "(1, 2)".into()), ("second", "(1, oops)".into())].into_iter().collect();
		let err = coerce_parenthesized_strings(&mut map).unwrap_err();

		assert!(matches!(err, Error::MalformedLiteral { .. }));
		assert_eq!(map.get("first"), Some(&ParamValue::Tuple(vec![1_i64.into(), 2_i64.into()])));
		assert_eq!(map.get("second"), Some(&ParamValue::from("(1, oops)")));
	}

	#[test]
	fn replace_key_is_copy_on_write() {
		let map: ParamMap = [("a", 1_i64.into())].into_iter().collect();
		let replaced = replace_key(&map, "a", 2_i64.into());
		let untouched = replace_key(&map, "missing", 2_i64.into());

		assert_eq!(map.get("a"), Some(&ParamValue::Int(1)));
		assert_eq!(replaced.get("a"), Some(&ParamValue::Int(2)));
		assert_eq!(untouched, map);
	}

	#[test]
	fn filter_keys_requires_every_key() {
		let map: ParamMap =
			[("a", 1_i64.into()), ("b", 2_i64.into()), ("c", 3_i64.into())].into_iter().collect();
		let filtered = filter_keys(&map, &["c", "a"]).unwrap();

		assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["c", "a"]);
		assert!(matches!(filter_keys(&map, &["z"]), Err(Error::MissingKey { key }) if key == "z"));
	}
}
