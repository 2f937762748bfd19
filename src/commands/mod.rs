//! Commands understood by the clock firmware
//!
//! Every command is a short ASCII body such as `BRIGHTNESS:8`. On the wire it is wrapped in a
//! start and end delimiter and terminated by a newline: `<BRIGHTNESS:8>\n`. The firmware does all
//! of the validation, so nothing here checks that values are in range; the invalid command
//! scenario relies on being able to send out-of-range values.

mod types;
pub use types::{Alarm, DisplayMode, TextMode};

use std::fmt;

use crate::{Error, Result};

pub const FRAME_START: u8 = b'<';
pub const FRAME_END: u8 = b'>';
pub const LINE_TERMINATOR: u8 = b'\n';

/// A command for the clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the clock to a Unix timestamp in seconds
    Time(u64),
    /// Set the display brightness
    Brightness(u8),
    /// Configure an alarm slot
    Alarm(Alarm),
    /// Show custom text
    Text { mode: TextMode, payload: String },
    /// Start (`play == true`) or stop a melody
    Music { play: bool, melody: u8 },
    /// Switch the display mode
    Mode(DisplayMode),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time(timestamp) => write!(f, "TIME:{}", timestamp),
            Self::Brightness(level) => write!(f, "BRIGHTNESS:{}", level),
            Self::Alarm(alarm) => write!(f, "ALARM:{}", alarm),
            Self::Text { mode, payload } => write!(f, "TEXT:{},{}", mode, payload),
            Self::Music { play, melody } => write!(f, "MUSIC:{},{}", u8::from(*play), melody),
            Self::Mode(mode) => write!(f, "MODE:{}", mode),
        }
    }
}

/// Wrap a command body for sending: `<` + body + `>` + newline
///
/// A body containing a delimiter or a line break would be split or cut short by the firmware's
/// parser, so it is rejected instead.
pub fn frame(body: &str) -> Result<Vec<u8>> {
    if body
        .bytes()
        .any(|b| matches!(b, FRAME_START | FRAME_END | LINE_TERMINATOR | b'\r'))
    {
        return Err(Error::Frame(body.to_owned()));
    }

    let mut frame = Vec::with_capacity(body.len() + 3);
    frame.push(FRAME_START);
    frame.extend_from_slice(body.as_bytes());
    frame.push(FRAME_END);
    frame.push(LINE_TERMINATOR);
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_wire_bodies() {
        assert_eq!(Command::Time(1_700_000_000).to_string(), "TIME:1700000000");
        assert_eq!(Command::Brightness(15).to_string(), "BRIGHTNESS:15");
        assert_eq!(
            Command::Alarm(Alarm {
                id: 1,
                hour: 12,
                minute: 0,
                enabled: true,
                melody: 1,
            })
            .to_string(),
            "ALARM:1,12,00,1,1"
        );
        assert_eq!(
            Command::Text {
                mode: TextMode::Scroll,
                payload: "Hello Arduino!".to_owned(),
            }
            .to_string(),
            "TEXT:0,Hello Arduino!"
        );
        assert_eq!(
            Command::Music {
                play: false,
                melody: 0,
            }
            .to_string(),
            "MUSIC:0,0"
        );
        assert_eq!(Command::Mode(DisplayMode::Time).to_string(), "MODE:TIME");
    }

    #[test]
    fn alarm_time_is_zero_padded() {
        let alarm = Alarm {
            id: 0,
            hour: 8,
            minute: 5,
            enabled: false,
            melody: 2,
        };
        assert_eq!(alarm.to_string(), "0,08,05,0,2");
    }

    #[test]
    fn frame_wraps_body() {
        assert_eq!(frame("MODE:TEXT").unwrap(), b"<MODE:TEXT>\n");
        assert_eq!(frame("").unwrap(), b"<>\n");
    }

    #[test]
    fn frame_rejects_delimiters() {
        for body in ["A>B", "<A", "A\nB", "A\r"] {
            assert!(matches!(frame(body), Err(Error::Frame(_))), "{:?}", body);
        }
    }
}
