use thiserror::Error;

use crate::generator::GenerateError;
use crate::output::OutputError;

#[derive(Error, Debug)]
pub enum EmvcError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

pub type Result<T> = std::result::Result<T, EmvcError>;
