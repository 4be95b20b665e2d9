use std::{io, path::PathBuf};
use thiserror::Error;

use crate::{api::ApiError, load::LoadError};

/// Any failure of an impact run, from any stage.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("configuration: {0}")]
    Config(String),

    #[error("writing results to {}", path.display())]
    ResultsFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing console output")]
    Output(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
