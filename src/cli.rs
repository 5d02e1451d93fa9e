use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};

use crate::reader::RecordFraming;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🎯 targetscan version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   count reads matching reference targets upstream of an adaptor";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// log every match, equivalent to RUST_LOG=debug
    #[arg(short, long, global = true, action)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count reads whose sequence before the adaptor matches a target, and dump every
    /// inexact match to Target_<T>_Mismatch_<D>.txt
    #[command(arg_required_else_help = true)]
    Scan {
        /// the input .fastq files, each scanned independently (e.g. R1 and R2)
        #[arg(required = true)]
        files: Vec<String>,

        /// directory for the mismatch files. with several inputs, each input gets a
        /// subdirectory named after the file
        #[arg(short, long, default_value = ".", verbatim_doc_comment)]
        output_dir: String,

        /// how lines are grouped into records
        #[arg(long, value_enum, default_value = "strict")]
        framing: RecordFraming,

        /// adaptor sequence marking the end of the region to match
        #[arg(long)]
        adaptor: Option<String>,

        /// target sequence; repeat for several targets, numbered in the order given.
        /// defaults to the four built-in targets
        #[arg(long = "target", verbatim_doc_comment)]
        targets: Vec<String>,

        /// largest number of substitutions counted against a target
        #[arg(short, long, default_value_t = crate::targets::MAX_MISMATCHES)]
        max_mismatches: usize,

        /// also write a JSON summary of the run to this file
        #[arg(long)]
        json: Option<String>,
    },

    /// Print the built-in adaptor and target sequences
    Targets,
}
