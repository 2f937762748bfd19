#![allow(dead_code)]

use std::{
    collections::VecDeque,
    io,
    time::{Duration, Instant},
};

use dgt_clock_tester::{
    device::{self, SerialComm},
    Config, Pacing, Runner,
};

type Responder = Box<dyn FnMut(&str) -> Option<String>>;

/// An in-memory clock that answers framed commands through a responder function
pub struct MockClock {
    /// Every frame written, in order
    pub written: Vec<Vec<u8>>,
    pub purges: usize,
    /// Make every write fail as if the device was unplugged
    pub unplugged: bool,
    /// How long after a command its response becomes readable
    pub delay: Duration,
    /// Print `RX: <body>` straight away, before the response, like a debug build of the firmware
    pub echo: bool,
    respond: Responder,
    /// Bytes not yet read, each with the moment it becomes readable
    pending: VecDeque<(Instant, u8)>,
}

impl MockClock {
    pub fn new(respond: impl FnMut(&str) -> Option<String> + 'static) -> Self {
        MockClock {
            written: Vec::new(),
            purges: 0,
            unplugged: false,
            delay: Duration::ZERO,
            echo: false,
            respond: Box::new(respond),
            pending: VecDeque::new(),
        }
    }

    /// Behaves like the real firmware
    pub fn firmware() -> Self {
        Self::new(firmware)
    }

    /// Never answers
    pub fn silent() -> Self {
        Self::new(|_| None)
    }

    /// Command bodies written so far, without framing
    pub fn bodies(&self) -> Vec<String> {
        self.written
            .iter()
            .map(|frame| {
                let text = String::from_utf8_lossy(frame);
                text.trim_start_matches('<')
                    .trim_end_matches('\n')
                    .trim_end_matches('>')
                    .to_owned()
            })
            .collect()
    }

    /// Queue bytes as if the clock had sent them on its own
    pub fn push_raw(&mut self, bytes: &[u8]) {
        self.queue(Instant::now(), bytes);
    }

    fn queue(&mut self, at: Instant, bytes: &[u8]) {
        self.pending.extend(bytes.iter().map(|b| (at, *b)));
    }
}

impl SerialComm for MockClock {
    fn write_all(&mut self, data: &[u8]) -> Result<(), device::Error> {
        if self.unplugged {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged").into());
        }
        self.written.push(data.to_vec());

        let body = self.bodies().pop().unwrap_or_default();
        let now = Instant::now();
        if self.echo {
            self.queue(now, format!("RX: {}\r\n", body).as_bytes());
        }
        if let Some(response) = (self.respond)(&body) {
            self.queue(now + self.delay, response.as_bytes());
        }
        Ok(())
    }

    fn read(&mut self, data: &mut [u8]) -> Result<usize, device::Error> {
        let len = self.bytes_available()?.min(data.len());
        for (slot, (_, byte)) in data.iter_mut().zip(self.pending.drain(..len)) {
            *slot = byte;
        }
        Ok(len)
    }

    fn bytes_available(&mut self) -> Result<usize, device::Error> {
        if self.unplugged {
            return Err(device::Error::Communication("device unplugged".to_owned()));
        }
        let now = Instant::now();
        Ok(self.pending.iter().take_while(|(at, _)| *at <= now).count())
    }

    fn purge_input(&mut self) -> Result<(), device::Error> {
        self.purges += 1;
        self.pending.clear();
        Ok(())
    }
}

/// Replies the way the clock firmware does
pub fn firmware(body: &str) -> Option<String> {
    let (family, args) = body.split_once(':')?;
    let first = args.split(',').next().unwrap_or_default();
    let reply = match family {
        "TIME" => "OK:TIME_SYNCED",
        "BRIGHTNESS" => match first.parse::<u8>() {
            Ok(level) if level <= 15 => "OK:BRIGHTNESS_SET",
            _ => "ERR:INVALID_BRIGHTNESS",
        },
        "ALARM" => match first.parse::<u8>() {
            Ok(id) if id < 2 => "OK:ALARM_SET",
            _ => "ERR:INVALID_ALARM_ID",
        },
        "TEXT" => "OK:TEXT_SET",
        "MUSIC" if first == "1" => "OK:MUSIC_PLAYED",
        "MUSIC" => "OK:MUSIC_STOPPED",
        "MODE" => return Some(format!("OK:MODE_{}\r\n", args)),
        _ => "ERR",
    };
    Some(format!("{}\r\n", reply))
}

/// Short timings so tests do not wait on real delays
pub fn fast_config() -> Config {
    Config {
        startup_delay: Duration::ZERO,
        settle_delay: Duration::ZERO,
        response_window: Duration::from_millis(60),
        poll_interval: Duration::from_millis(2),
        color: false,
        pacing: Pacing::none(),
        ..Config::default()
    }
}

pub fn runner(clock: MockClock) -> Runner<MockClock> {
    Runner::new(clock, fast_config())
}
