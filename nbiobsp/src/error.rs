//! High-level error types

use nbiobsp_sdk::RawStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SDK error: {0}")]
    Sdk(#[from] nbiobsp_sdk::Error),

    #[error("Type error: {0}")]
    Types(#[from] nbiobsp_types::Error),

    /// A vendor call returned a nonzero status; the description is the
    /// vendor's own wording for that code
    #[error("Vendor error 0x{status:04X}: {description}")]
    Vendor {
        status: RawStatus,
        description: String,
    },

    #[error("Device not open")]
    NotOpen,

    #[error("Device already open")]
    AlreadyOpen,
}

impl Error {
    /// Check if a required vendor library file was absent at load time
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, Self::Sdk(nbiobsp_sdk::Error::MissingDependency { .. }))
    }

    /// Check if this is a vendor call failure
    pub fn is_vendor(&self) -> bool {
        matches!(self, Self::Vendor { .. })
    }

    /// Raw vendor status behind this error, if it is one
    pub fn vendor_status(&self) -> Option<RawStatus> {
        match self {
            Self::Vendor { status, .. } => Some(*status),
            _ => None,
        }
    }
}
