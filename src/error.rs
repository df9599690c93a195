use std::path::PathBuf;

/// Errors that can occur when loading or validating a `GameConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}

/// Errors produced when parsing a board from its text form.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("board has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected} (boards are square)")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized character '{found}' in row {row} col {col}")]
    UnrecognizedChar { found: char, row: usize, col: usize },
}
