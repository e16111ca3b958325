use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod apply;
mod config;
mod list;
mod prompt;
mod tty;

#[derive(Parser)]
#[command(name = "kivar")]
#[command(about = "Resolve build variants in KiCad schematics", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the variants defined in a schematic
    #[command(alias = "ls")]
    List(list::ListArgs),

    /// Apply one variant to a schematic
    #[command(alias = "a")]
    Apply(apply::ApplyArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug; RUST_LOG still wins.
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::List(args) => list::execute(args),
        Commands::Apply(args) => apply::execute(args),
    }
}
