use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchematicError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] kivar_sexpr::ParseError),

    #[error("Not a KiCad schematic (expected a `kicad_sch` root)")]
    NotASchematic,

    #[error("Malformed property at byte {offset}")]
    MalformedProperty { offset: usize },

    #[error("Expected {expected} symbols, got {found}")]
    SymbolCountMismatch { expected: usize, found: usize },
}
