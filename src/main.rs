use clap::Parser;
use kg_normalizer::{cli, logging, Result};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    let _logging = logging::init(&args.command)?;
    cli::run(args)
}
