use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use kivar_core::{
    Action, FixedSelector, Outcome, Report, ResolveConfig, Selection, VariantName, VariantSelector,
    discover, resolve_with,
};
use kivar_sch::Schematic;

use crate::config;
use crate::prompt::PromptSelector;
use crate::tty;

#[derive(Args, Debug, Clone)]
#[command(about = "Apply one variant to a schematic")]
pub struct ApplyArgs {
    /// .kicad_sch file to resolve
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Variant to apply (prompts when omitted in a terminal)
    #[arg(long, value_name = "NAME")]
    pub variant: Option<String>,

    /// Write the result here instead of overwriting FILE
    #[arg(short, long, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Resolve and report without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Policy file (defaults to kivar.toml next to the schematic)
    #[arg(long, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Also report symbols the variant leaves alone
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn execute(args: ApplyArgs) -> Result<()> {
    let policy = config::load_policy(args.config.as_deref(), &args.file)?;
    let schematic = Schematic::from_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let discovery = discover(schematic.symbols(), &policy);

    let selection = match &args.variant {
        Some(name) => {
            let name: VariantName = name.parse().context("Invalid --variant")?;
            FixedSelector::new(name).select(&discovery.catalog)?
        }
        None if tty::is_interactive() => PromptSelector.select(&discovery.catalog)?,
        None => bail!("No variant given; pass --variant when not running interactively"),
    };
    let variant = match selection {
        Selection::Chosen(variant) => variant,
        Selection::Cancelled => bail!("User cancelled"),
    };

    println!("Applying variant {}", variant.as_str().bold());
    let config = ResolveConfig::new(policy, variant);
    let mut symbols = schematic.symbols().to_vec();
    let report = resolve_with(&mut symbols, &config, &discovery);
    print_report(&report, args.verbose);

    if !report.success() {
        bail!("Errors present - file not updated");
    }
    if args.dry_run {
        println!("{}", "Dry run - file not updated".yellow());
        return Ok(());
    }

    let target = args.output.as_ref().unwrap_or(&args.file);
    println!("Updating file {}", target.display());
    schematic
        .write(&symbols, target)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    println!(
        "{} {} symbol(s) updated",
        "Finished:".green(),
        report.applied()
    );
    Ok(())
}

fn print_report(report: &Report, verbose: bool) {
    for outcome in &report.outcomes {
        if outcome.is_skip() && !verbose {
            continue;
        }
        println!("{}", styled(outcome));
    }
}

fn styled(outcome: &Outcome) -> colored::ColoredString {
    let line = outcome.to_string();
    match &outcome.result {
        Err(_) => line.red(),
        Ok(Action::DoNotFit { .. } | Action::Shorted { .. }) => line.yellow(),
        Ok(Action::Substituted { .. }) => line.cyan(),
        Ok(_) => line.normal(),
    }
}
