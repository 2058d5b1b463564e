use std::path::PathBuf;

/// Failure to load a single model. Never partial: any error fails the model.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid model identifier '{0}'")]
    InvalidId(String),
    #[error("model '{model}': {} not found", path.display())]
    NotFound { model: String, path: PathBuf },
    #[error("model '{model}': failed to read {}: {source}", path.display())]
    Io {
        model: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model '{model}': failed to parse {}: {message}", path.display())]
    Parse {
        model: String,
        path: PathBuf,
        message: String,
    },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. } | LoadError::InvalidId(_))
    }
}
