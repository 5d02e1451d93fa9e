extern crate env_logger;
#[macro_use]
extern crate log;
use std::io::{prelude::*, stdout, BufWriter};

use anyhow::Result;
use clap::Parser;

mod adaptor;
mod cli;
mod file;
mod matcher;
mod reader;
mod report;
mod scan;
mod summary;
mod tally;
mod targets;

use cli::{Cli, Commands};
use targets::TargetSet;

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_target(false)
        .init();

    info!("targetscan v{}", cli::VERSION);

    match &cli.command {
        Commands::Scan {
            files,
            output_dir,
            framing,
            adaptor,
            targets,
            max_mismatches,
            json,
        } => {
            let targets = TargetSet::from_options(adaptor.as_deref(), targets, *max_mismatches)?;
            info!(
                "Matching {} targets up to {} mismatches before adaptor {}",
                targets.targets.len(),
                targets.max_mismatches,
                targets.adaptor
            );

            let mut writer = BufWriter::new(stdout());
            scan::scan_files(files, &targets, *framing, output_dir, json, &mut writer)?;

            info!("Completed successfully.")
        }
        Commands::Targets => {
            let targets = TargetSet::default();
            let mut writer = BufWriter::new(stdout());

            writeln!(writer, "Adaptor: {}", targets.adaptor)?;
            for (i, t) in targets.targets.iter().enumerate() {
                writeln!(writer, "Target: {}, Sequence: {}", i + 1, t)?;
            }
            writer.flush()?;
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
