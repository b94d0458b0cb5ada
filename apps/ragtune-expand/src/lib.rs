use std::{fs, path::PathBuf};

use clap::Parser;
use color_eyre::eyre;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use ragtune_params::ParamMap;

#[derive(Debug, Parser)]
#[command(
	version = ragtune_cli::VERSION,
	rename_all = "kebab",
	styles = ragtune_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// TOML file whose list values are the candidates of each parameter.
	#[arg(long, short = 's', value_name = "FILE")]
	pub space: PathBuf,
	/// Group trials into batches of `executor.batch_size`.
	#[arg(long)]
	pub batched: bool,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let config = ragtune_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	let raw = fs::read_to_string(&args.space)
		.map_err(|err| eyre::eyre!("Failed to read {}: {err}.", args.space.display()))?;
	let trials = expand_space(&raw)?;

	tracing::info!(trials = trials.len(), space = %args.space.display(), "Expanded parameter space.");

	let output = if args.batched {
		render_batches(trials, config.executor.batch_size)?
	} else {
		serde_json::to_value(trials)?
	};

	println!("{}", serde_json::to_string_pretty(&output)?);

	Ok(())
}

/// Parses a parameter space, resolves `${VAR}` references and tuple literals, and returns every
/// trial assignment.
pub fn expand_space(raw: &str) -> color_eyre::Result<Vec<ParamMap>> {
	let mut space: ParamMap = toml::from_str(raw)?;

	ragtune_params::substitute_environment(&mut space)?;
	ragtune_params::coerce_parenthesized_strings(&mut space)?;

	Ok(ragtune_params::expand(&space))
}

fn render_batches(trials: Vec<ParamMap>, batch_size: usize) -> color_eyre::Result<Value> {
	let batches = ragtune_ragged::make_batches(trials, batch_size)?;

	Ok(serde_json::to_value(batches)?)
}
