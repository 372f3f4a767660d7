use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON dictionary {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid abbreviation rule '{key}': {message}")]
    InvalidAbbreviation { key: String, message: String },

    #[error("invalid plural rule '{suffix}': {message}")]
    InvalidPluralRule { suffix: String, message: String },

    #[error("duplicate canonical exercise: {name}")]
    DuplicateCanonical { name: String },

    #[error("synonym '{synonym}' maps to both '{first}' and '{second}'")]
    AmbiguousSynonym {
        synonym: String,
        first: String,
        second: String,
    },

    #[error("duplicate Garmin catalog entry: {name}")]
    DuplicateCatalogEntry { name: String },

    #[error("invalid manual override '{key}': {message}")]
    InvalidOverride { key: String, message: String },

    #[error("dictionary entry '{name}' has an empty {field}")]
    EmptyField { name: String, field: String },
}

pub type Result<T> = std::result::Result<T, LexiconError>;
