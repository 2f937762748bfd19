use super::Result;

pub const DEFAULT_BAUD_RATE: u32 = 9_600;

/// An API to communicate with a serial device
pub trait SerialComm {
    fn write_all(&mut self, data: &[u8]) -> Result<()>;

    /// Read up to `data.len()` bytes, returning `0` when nothing arrived before the port timeout
    fn read(&mut self, data: &mut [u8]) -> Result<usize>;

    /// Number of received bytes waiting to be read
    fn bytes_available(&mut self) -> Result<usize>;

    /// Discard anything received but not yet read
    fn purge_input(&mut self) -> Result<()>;
}
