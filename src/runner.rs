use log::{debug, info, trace};
use std::{
    cmp,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread, time,
};

use crate::{
    commands::{self, Command, LINE_TERMINATOR},
    device::SerialComm,
    Config, Console, Error, Result,
};

const READ_CHUNK: usize = 256;

/// Sends commands to the clock and collects what it answers
///
/// The runner owns the connection for the whole run. Every [exchange](Self::exchange) writes one
/// framed command, waits for the clock to settle and then collects incoming bytes for at most the
/// configured response window. All waits check the interrupt flag, so an interrupted run returns
/// [Error::Interrupted] promptly and the connection is released when the runner is dropped.
pub struct Runner<T: SerialComm> {
    device: T,
    config: Config,
    console: Console,
    interrupted: Arc<AtomicBool>,
}

impl<T: SerialComm> Runner<T> {
    pub fn new(device: T, config: Config) -> Self {
        let console = Console::new(config.color);
        Self {
            device,
            config,
            console,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use `flag` as the interrupt flag; once it is set every wait fails with
    /// [Error::Interrupted]
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = flag;
        self
    }

    /// Wait for the board to come up after the port was opened, then drop whatever it printed
    /// while booting
    pub fn prepare(&mut self) -> Result<()> {
        info!("waiting {:?} for the clock to start", self.config.startup_delay);
        self.pause(self.config.startup_delay)?;
        self.device.purge_input()?;
        Ok(())
    }

    /// Send a command and collect the response
    pub fn send(&mut self, command: &Command) -> Result<String> {
        self.exchange(&command.to_string())
    }

    /// Send a raw command body and collect the response
    ///
    /// The body is framed as `<body>\n`. The returned text is everything that arrived within the
    /// response window, with undecodable bytes dropped; it is empty if the clock stayed silent.
    pub fn exchange(&mut self, body: &str) -> Result<String> {
        let frame = commands::frame(body)?;
        self.console.test(&format!("Sending: <{}>", body));
        trace!("exchange: writing {:?}", frame);
        self.device.write_all(&frame)?;

        self.pause(self.config.settle_delay)?;
        let response = self.collect()?;

        debug!("exchange: sent {:?}, got {:?}", body, response);
        if !response.is_empty() {
            self.console.info(&format!("Response: {}", response.trim()));
        }
        Ok(response)
    }

    /// Sleep for `duration`, waking up regularly to check the interrupt flag
    pub fn pause(&self, duration: time::Duration) -> Result<()> {
        let slice = cmp::max(self.config.poll_interval, time::Duration::from_millis(1));
        let start = time::Instant::now();
        loop {
            self.check_interrupt()?;
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return Ok(());
            }
            thread::sleep(cmp::min(slice, duration - elapsed));
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn device(&self) -> &T {
        &self.device
    }

    fn check_interrupt(&self) -> Result<()> {
        if self.interrupted.load(Ordering::SeqCst) {
            Err(Error::Interrupted)
        } else {
            Ok(())
        }
    }

    /// Poll the port until the window closes or, if enabled, a line terminator arrives
    fn collect(&mut self) -> Result<String> {
        let mut received = Vec::new();
        let start = time::Instant::now();
        while start.elapsed() < self.config.response_window {
            self.check_interrupt()?;
            self.read_available(&mut received)?;
            if self.config.stop_on_terminator && received.contains(&LINE_TERMINATOR) {
                trace!("collect: terminator after {:?}", start.elapsed());
                break;
            }
            thread::sleep(self.config.poll_interval);
        }
        Ok(decode(&received))
    }

    fn read_available(&mut self, received: &mut Vec<u8>) -> Result<()> {
        let mut buf = [0u8; READ_CHUNK];
        let mut available = self.device.bytes_available()?;
        while available > 0 {
            let len = self.device.read(&mut buf[..cmp::min(available, READ_CHUNK)])?;
            if len == 0 {
                break;
            }
            trace!("read_available: values {:?}", String::from_utf8_lossy(&buf[..len]));
            received.extend_from_slice(&buf[..len]);
            available = available.saturating_sub(len);
        }
        Ok(())
    }
}

/// Decode as UTF-8, dropping invalid sequences instead of replacing them
pub fn decode(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_drops_invalid_bytes() {
        assert_eq!(decode(b"OK:\xffTIME_SYNCED\r\n"), "OK:TIME_SYNCED\r\n");
        assert_eq!(decode(b"\xc3"), "");
        assert_eq!(decode("caf\u{e9}".as_bytes()), "caf\u{e9}");
        assert_eq!(decode(b""), "");
    }
}
