use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod blog;
pub mod case_study;
pub mod content_file;
pub mod frontmatter;
pub mod heading_index;
pub mod markdown_renderer;
pub mod repository;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Error reading content directory {dir}: {source}")]
    Directory {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed frontmatter in {path}: {reason}")]
    Frontmatter { path: PathBuf, reason: String },

    #[error("Error rendering markdown for {path}: {reason}")]
    Markdown { path: PathBuf, reason: String },
}

pub type ContentResult<T> = Result<T, ContentError>;
