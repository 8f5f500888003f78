pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown FIR format code: {0}")]
    UnknownFormat(u32),
}
