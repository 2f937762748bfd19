//! Connections to the clock's serial command interface

mod serial_comm;
pub use serial_comm::{SerialComm, DEFAULT_BAUD_RATE};

#[cfg(feature = "serialport_comm")]
mod serialport_comm;
#[cfg(feature = "serialport_comm")]
pub use serialport_comm::SerialPort;

type Result<T> = std::result::Result<T, Error>;

/// A connection-level failure
///
/// Any of these means the connection is unusable, so a run that hits one is aborted.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[cfg(feature = "serialport_comm")]
    #[error("Serial port error: `{0}`")]
    Serial(serialport::Error),
    #[error("IO error: `{0}`")]
    IO(std::io::Error),
    #[error("Communication error: `{0}`")]
    Communication(String),
}

#[cfg(feature = "serialport_comm")]
impl From<serialport::Error> for Error {
    fn from(e: serialport::Error) -> Self {
        Error::Serial(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IO(e)
    }
}
