use ragtune_params::ParamValue;

#[test]
fn expands_a_space_with_tuple_literals() {
	let raw = r#"
top_k = [5, 10]
weights = ["(0.3, 0.7)", "(0.5, 0.5)"]
module = "hybrid_cc"
"#;
	let trials = ragtune_expand::expand_space(raw).expect("Failed to expand space.");

	assert_eq!(trials.len(), 4);
	assert_eq!(trials[0].keys().collect::<Vec<_>>(), vec!["top_k", "weights", "module"]);
	assert_eq!(trials[0].get("top_k"), Some(&ParamValue::Int(5)));
	assert_eq!(
		trials[1].get("weights"),
		Some(&ParamValue::Tuple(vec![ParamValue::Float(0.5), ParamValue::Float(0.5)]))
	);
	assert_eq!(trials[3].get("module"), Some(&ParamValue::from("hybrid_cc")));
}

#[test]
fn malformed_literals_fail_the_run() {
	assert!(ragtune_expand::expand_space("weights = \"(0.3, nope)\"").is_err());
}
