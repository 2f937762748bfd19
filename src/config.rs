//! Run configuration
//!
//! Everything that used to be a compiled-in constant lives in [Config], which is handed to the
//! [Runner](crate::Runner) when it is built. [Config::default] holds the values the tool uses
//! when started without arguments.

use std::time::Duration;

use crate::device::DEFAULT_BAUD_RATE;

pub const DEFAULT_PORT: &str = "/dev/ttyACM0";

/// Settings for the serial connection and the exchange timing
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the serial device
    pub port: String,
    pub baud_rate: u32,
    /// Timeout of a single blocking read on the port
    pub read_timeout: Duration,
    /// Wait after opening the port; the board resets when the port is opened
    pub startup_delay: Duration,
    /// Wait between writing a command and starting to read
    pub settle_delay: Duration,
    /// Upper bound on how long a response is collected
    pub response_window: Duration,
    /// Sleep between two polls of the port while collecting
    pub poll_interval: Duration,
    /// Stop collecting as soon as a line terminator arrives instead of waiting out the window
    ///
    /// Off by default: the clock may print an echo or debug line before its acknowledgement, and
    /// stopping at the first line would cut the acknowledgement off.
    pub stop_on_terminator: bool,
    /// Emit ANSI colours on the console
    pub color: bool,
    pub pacing: Pacing,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT.to_owned(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: Duration::from_secs(2),
            startup_delay: Duration::from_secs(2),
            settle_delay: Duration::from_millis(500),
            response_window: Duration::from_millis(1500),
            poll_interval: Duration::from_millis(100),
            stop_on_terminator: false,
            color: true,
            pacing: Pacing::default(),
        }
    }
}

impl Config {
    /// The longest a single exchange may take, not counting the time spent writing
    pub fn exchange_bound(&self) -> Duration {
        self.settle_delay + self.response_window + self.poll_interval
    }
}

/// Delays between the steps of a scenario, giving the clock time to act on a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacing {
    pub brightness_step: Duration,
    pub alarm_step: Duration,
    pub text_step: Duration,
    /// How long a melody is left playing before it is stopped
    pub melody_playback: Duration,
    pub melody_stop: Duration,
    pub mode_step: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            brightness_step: Duration::from_millis(500),
            alarm_step: Duration::from_millis(500),
            text_step: Duration::from_secs(1),
            melody_playback: Duration::from_secs(2),
            melody_stop: Duration::from_millis(500),
            mode_step: Duration::from_secs(1),
        }
    }
}

impl Pacing {
    /// No delays at all
    pub const fn none() -> Self {
        Pacing {
            brightness_step: Duration::ZERO,
            alarm_step: Duration::ZERO,
            text_step: Duration::ZERO,
            melody_playback: Duration::ZERO,
            melody_stop: Duration::ZERO,
            mode_step: Duration::ZERO,
        }
    }
}
