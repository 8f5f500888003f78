//! SDK loading errors

use std::path::PathBuf;

use crate::status::RawStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required vendor library file is absent; fatal, raised before any
    /// device interaction is attempted
    #[error("Required vendor library {} not found", path.display())]
    MissingDependency { path: PathBuf },

    #[error("Failed to load vendor library {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Vendor library does not export {name}: {source}")]
    MissingSymbol {
        name: String,
        #[source]
        source: libloading::Error,
    },

    #[error("Vendor SDK initialization failed with status 0x{status:04X}")]
    Init { status: RawStatus },
}
