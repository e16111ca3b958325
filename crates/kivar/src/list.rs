use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use kivar_core::{VariantCatalog, discover};
use kivar_sch::Schematic;

use crate::config;

#[derive(Args, Debug, Clone)]
#[command(about = "List the variants defined in a schematic")]
pub struct ListArgs {
    /// .kicad_sch file to inspect
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Policy file (defaults to kivar.toml next to the schematic)
    #[arg(long, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: ListArgs) -> Result<()> {
    let policy = config::load_policy(args.config.as_deref(), &args.file)?;
    let schematic = Schematic::from_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let discovery = discover(schematic.symbols(), &policy);
    if discovery.catalog.is_empty() {
        println!("{}", "No variants found".yellow());
        return Ok(());
    }

    write_variant_table(&discovery.catalog, io::stdout().lock())?;
    Ok(())
}

fn write_variant_table<W: Write>(catalog: &VariantCatalog, mut writer: W) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Variant", "Symbols"]);

    for name in catalog.sorted_names() {
        let assigned = catalog
            .entries()
            .iter()
            .find(|e| e.name == name)
            .map_or(0, |e| e.assigned);
        table.add_row(vec![name.to_string(), assigned.to_string()]);
    }

    writeln!(writer, "{table}")
}
