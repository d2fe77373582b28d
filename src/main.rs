#![forbid(unsafe_code)]
//! galasabld Command Line Interface

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use console::style;

use galasabld::commands::{execute_template, TemplateOptions};
use galasabld::logging;
use galasabld::selection::ModeFlags;

#[derive(Parser)]
#[command(name = "galasabld")]
#[command(about = "Galasa build utilities")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generates files from a template using the Galasa release metadata file
    Template(TemplateArgs),
}

#[derive(Args)]
struct TemplateArgs {
    /// Template file
    #[arg(short = 't', long, env = "GALASABLD_TEMPLATE")]
    template: Option<PathBuf>,

    /// Release metadata file
    #[arg(short = 'r', long = "releaseMetadata", env = "GALASABLD_RELEASE_METADATA")]
    release_metadata: Option<PathBuf>,

    /// Output file (standard output when omitted)
    #[arg(short = 'o', long, env = "GALASABLD_OUTPUT")]
    output: Option<PathBuf>,

    /// Require maven artifacts for OBR
    #[arg(long)]
    obr: bool,

    /// Require maven artifacts for BOM
    #[arg(long)]
    bom: bool,

    /// Require maven artifacts for mvp zip
    #[arg(long)]
    mvp: bool,

    /// Require maven artifacts for isolated zip
    #[arg(long)]
    isolated: bool,

    /// Require maven artifacts for javadoc
    #[arg(long)]
    javadoc: bool,

    /// Require maven artifacts for manager docs
    #[arg(long)]
    managerdoc: bool,
}

impl From<TemplateArgs> for TemplateOptions {
    fn from(args: TemplateArgs) -> Self {
        TemplateOptions {
            template: args.template,
            release_metadata: args.release_metadata,
            output: args.output,
            modes: ModeFlags {
                obr: args.obr,
                bom: args.bom,
                mvp: args.mvp,
                isolated: args.isolated,
                javadoc: args.javadoc,
                managerdoc: args.managerdoc,
            },
        }
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Template(args) => execute_template(args.into()),
    }
}

/// Process exit status for a finished run: 0 on success, 1 for any error
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn report(err: &anyhow::Error) {
    eprintln!("{} {}", style("✗").red(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {}", cause);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{} Failed to initialise logging: {}", style("!").yellow(), e);
    }

    let result = run(cli.command);
    if let Err(e) = &result {
        report(e);
    }
    ExitCode::from(exit_status(&result))
}
