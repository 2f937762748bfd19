use std::fmt;

/// One of the clock's alarm slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alarm {
    /// Slot number; the firmware has slots 0 and 1
    pub id: u8,
    pub hour: u8,
    pub minute: u8,
    pub enabled: bool,
    /// Melody played when the alarm goes off
    pub melody: u8,
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{:02},{:02},{},{}",
            self.id,
            self.hour,
            self.minute,
            u8::from(self.enabled),
            self.melody
        )
    }
}

/// How custom text is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// Scrolls across the display, sent as `0`
    Scroll,
    /// Stays in place, sent as `1`
    Static,
}

impl fmt::Display for TextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scroll => "0",
            Self::Static => "1",
        })
    }
}

/// What the display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Text,
    Time,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "TEXT",
            Self::Time => "TIME",
        })
    }
}
