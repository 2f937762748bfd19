pub type Result<T> = std::result::Result<T, Error>;

/// An error while exercising the clock
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The connection to the clock failed; nothing further can be sent
    #[error("{0}")]
    Device(crate::device::Error),

    /// A command body contained a frame delimiter or line terminator
    #[error("Cannot frame command `{0}`")]
    Frame(String),

    /// The run was interrupted by the user
    #[error("Interrupted")]
    Interrupted,

    /// Another error occurred
    #[error("{0}")]
    Other(String),
}

impl From<crate::device::Error> for Error {
    fn from(e: crate::device::Error) -> Self {
        Error::Device(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Device(e.into())
    }
}

impl From<ctrlc::Error> for Error {
    fn from(e: ctrlc::Error) -> Self {
        Error::Other(format!("could not install interrupt handler: {}", e))
    }
}
