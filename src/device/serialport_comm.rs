use super::serial_comm::SerialComm;
use super::Result;
use log::debug;
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

/// Communicate with a serial device using the
/// serialport library
///
/// /dev/tty* or similar on unix-like systems
/// COM devices on Windows systems
pub struct SerialPort {
    device: Box<dyn serialport::SerialPort>,
}

impl SerialPort {
    /// Opens `path` at `baud_rate` with 8N1 framing
    pub fn new(path: &str, baud_rate: u32, timeout: Duration) -> Result<Self> {
        debug!("opening {} at {} baud", path, baud_rate);
        let device = serialport::new(path, baud_rate)
            .timeout(timeout)
            .parity(serialport::Parity::None)
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .open()?;

        Ok(Self { device })
    }

    pub fn name(&self) -> Option<String> {
        self.device.name()
    }
}

impl SerialComm for SerialPort {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.device.write_all(data)?;
        Ok(self.device.flush()?)
    }

    fn read(&mut self, data: &mut [u8]) -> Result<usize> {
        match self.device.read(data) {
            Ok(len) => Ok(len),
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.device.bytes_to_read()? as usize)
    }

    fn purge_input(&mut self) -> Result<()> {
        Ok(self.device.clear(serialport::ClearBuffer::Input)?)
    }
}
