use clap::Parser;

use ragtune_expand::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	ragtune_expand::run(Args::parse())
}
