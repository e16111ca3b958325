//! Read placed symbols out of a KiCad `.kicad_sch` file and write resolved
//! symbols back.
//!
//! Writing only touches the text of symbols that changed: flag atoms are
//! rewritten in place and a changed property run is replaced as a whole.
//! Everything else in the file stays byte-identical.

mod error;
mod layout;
mod render;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use kivar_core::Symbol;
use kivar_sexpr::PatchSet;
use kivar_sexpr::kicad::{kicad_sch_items, placed_symbols};

pub use error::SchematicError;

use layout::{SymbolLayout, read_symbol};

/// A parsed schematic: its source text and the placed symbols it contains.
#[derive(Debug, Clone)]
pub struct Schematic {
    source: String,
    symbols: Vec<Symbol>,
    layouts: Vec<SymbolLayout>,
}

impl Schematic {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchematicError> {
        let path = path.as_ref();
        log::debug!("Reading schematic {}", path.display());
        let source = fs::read_to_string(path)?;
        Self::parse(source)
    }

    pub fn parse(source: impl Into<String>) -> Result<Self, SchematicError> {
        let source = source.into();
        let root = kivar_sexpr::parse(&source)?;
        let items = kicad_sch_items(&root).ok_or(SchematicError::NotASchematic)?;

        let mut symbols = Vec::new();
        let mut layouts = Vec::new();
        for node in placed_symbols(items) {
            let (symbol, layout) = read_symbol(node, &source)?;
            symbols.push(symbol);
            layouts.push(layout);
        }
        log::debug!("Found {} placed symbol(s)", symbols.len());

        Ok(Self {
            source,
            symbols,
            layouts,
        })
    }

    /// Placed symbols in document order, as read from the file.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Patches that turn the file's symbols into `resolved`.
    ///
    /// `resolved` must hold one symbol per placed symbol, in document order.
    pub fn patches(&self, resolved: &[Symbol]) -> Result<PatchSet, SchematicError> {
        if resolved.len() != self.symbols.len() {
            return Err(SchematicError::SymbolCountMismatch {
                expected: self.symbols.len(),
                found: resolved.len(),
            });
        }

        let mut patches = PatchSet::new();
        for ((layout, before), after) in self.layouts.iter().zip(&self.symbols).zip(resolved) {
            render::patch_symbol(layout, before, after, &self.source, &mut patches);
        }
        log::debug!("Prepared {} patch(es)", patches.len());
        Ok(patches)
    }

    /// Full document text with `resolved` written back.
    pub fn render(&self, resolved: &[Symbol]) -> Result<String, SchematicError> {
        Ok(self.patches(resolved)?.apply(&self.source))
    }

    /// Atomically write the document with `resolved` applied to `path`.
    pub fn write(&self, resolved: &[Symbol], path: impl AsRef<Path>) -> Result<(), SchematicError> {
        let path = path.as_ref();
        let patches = self.patches(resolved)?;
        log::debug!("Writing schematic {}", path.display());
        AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
            .write(|f| {
                let mut writer = BufWriter::new(f);
                patches.write_to(&self.source, &mut writer)?;
                writer.flush()
            })
            .map_err(|err| match err {
                atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => e,
            })?;
        Ok(())
    }
}

impl FromStr for Schematic {
    type Err = SchematicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = r#"(kicad_sch (version 20231120)
  (lib_symbols
    (symbol "Device:R" (in_bom yes)
      (property "Reference" "R" (at 0 0 0))))
  (symbol (lib_id "Device:R") (at 50 50 0) (in_bom yes) (dnp no)
    (property "Reference" "R1" (at 52 49 0))
    (property "Value" "10k" (at 52 51 0)))
)"#;

    #[test]
    fn skips_library_definitions() {
        let sch: Schematic = SHEET.parse().unwrap();
        assert_eq!(sch.symbols().len(), 1);
        assert_eq!(sch.symbols()[0].properties[0].value, "R1");
    }

    #[test]
    fn rejects_other_documents() {
        assert!(matches!(
            Schematic::parse("(kicad_pcb (version 20231120))"),
            Err(SchematicError::NotASchematic)
        ));
        assert!(matches!(Schematic::parse("(kicad_sch"), Err(SchematicError::Parse(_))));
    }

    #[test]
    fn rejects_symbol_count_mismatch() {
        let sch: Schematic = SHEET.parse().unwrap();
        assert!(matches!(
            sch.render(&[]),
            Err(SchematicError::SymbolCountMismatch { expected: 1, found: 0 })
        ));
    }

    #[test]
    fn writes_atomically_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.kicad_sch");
        let sch: Schematic = SHEET.parse().unwrap();

        let mut symbols = sch.symbols().to_vec();
        symbols[0].unfit();
        sch.write(&symbols, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("(in_bom no) (dnp yes)"));
        assert_eq!(Schematic::from_file(&path).unwrap().symbols(), symbols.as_slice());
    }
}
