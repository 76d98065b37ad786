use std::path::PathBuf;
use thiserror::Error;

pub type VcfFrameResult<T> = std::result::Result<T, VcfFrameError>;

#[derive(Debug, Error)]
pub enum VcfFrameError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Htslib(#[from] rust_htslib::errors::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("argument must be a string, path to a VCF File")]
    InvalidPathArgument,
    #[error("filepath must end with .vcf")]
    InvalidExtension { path: PathBuf },
    #[error("File not found in vcf path")]
    VcfNotFound { path: PathBuf },
    #[error("Panel Result is empty")]
    EmptyPanel,
    #[error("There was an error parsing GeneList. Error was: {message}")]
    PanelLoad { path: PathBuf, message: String },
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
    #[error("Column {0} not present in table")]
    MissingColumn(String),
}

impl VcfFrameError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn panel_load(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::PanelLoad {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

#[macro_export]
macro_rules! vcfframe_error {
    ($($arg:tt)*) => {
        $crate::error::VcfFrameError::message(format!($($arg)*))
    };
}
