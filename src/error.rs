use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("could not read {path}")]
    ReadWithPath {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not write to {path}")]
    Write {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not create output directory")]
    OutputDir {
        #[source]
        source: std::io::Error,
    },

    #[error("could not write to TSV")]
    CsvWrite(#[from] csv::Error),

    #[error("could not build thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid progress bar template")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),

    #[error("{path} does not start with an MD5 digest")]
    ChecksumFormat { path: std::path::PathBuf },

    #[error("MD5 mismatch for {path} (expected {expected}, got {actual})")]
    ChecksumMismatch {
        path: std::path::PathBuf,
        expected: String,
        actual: String,
    },

    #[error("need at least 2 individuals (got {n_individuals})")]
    SampleCount { n_individuals: usize },

    #[error("malformed catalog row {line_num}: {reason}")]
    MalformedRow { line_num: usize, reason: String },

    #[error("malformed genotype line {line_num}: {reason}")]
    MalformedLine { line_num: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, CustomError>;
