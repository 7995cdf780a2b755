use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole operation on the bank.
///
/// Problems with individual records never show up here; they are reported
/// one by one and the load carries on.
#[derive(Error, Debug)]
pub enum BankError {
    #[error("Unable to open '{}': {source}", path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported file extension for '{}' (should be .csv, .json or .xml)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}
