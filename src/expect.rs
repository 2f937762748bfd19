//! Named acknowledgement checks
//!
//! The firmware acknowledges a command with a line such as `OK:ALARM_SET`. Older firmware builds
//! answer with slightly different wording, so a response passes as long as it contains the
//! broader family marker (`ALARM`). Whether the exact acknowledgement was seen is only logged.

use log::debug;

/// What a response says about an [Expectation]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// The exact acknowledgement was found
    Exact,
    /// Only the family marker was found
    Family,
    Missing,
}

impl Match {
    pub fn is_found(self) -> bool {
        self != Match::Missing
    }
}

/// A marker pair to look for in a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    pub name: &'static str,
    /// The acknowledgement the current firmware sends
    pub exact: &'static str,
    /// Substring that is enough to count as acknowledged
    pub family: &'static str,
}

impl Expectation {
    pub const TIME_SYNCED: Self = Self::new("time synced", "OK:TIME_SYNCED", "TIME_SYNCED");
    pub const BRIGHTNESS_SET: Self =
        Self::new("brightness set", "OK:BRIGHTNESS_SET", "BRIGHTNESS");
    pub const ALARM_SET: Self = Self::new("alarm set", "OK:ALARM_SET", "ALARM");
    pub const TEXT_SET: Self = Self::new("text set", "OK:TEXT_SET", "TEXT");
    pub const MUSIC_PLAYED: Self = Self::new("music played", "OK:MUSIC_PLAYED", "MUSIC");
    pub const MODE_TEXT: Self = Self::new("text mode", "OK:MODE_TEXT", "MODE");
    pub const MODE_TIME: Self = Self::new("time mode", "OK:MODE_TIME", "MODE");
    pub const REJECTED: Self = Self::new("rejected", "ERR", "ERR");
    pub const INVALID_ALARM_ID: Self = Self::new(
        "invalid alarm id",
        "ERR:INVALID_ALARM_ID",
        "ERR:INVALID_ALARM_ID",
    );

    pub const ALL: [Self; 9] = [
        Self::TIME_SYNCED,
        Self::BRIGHTNESS_SET,
        Self::ALARM_SET,
        Self::TEXT_SET,
        Self::MUSIC_PLAYED,
        Self::MODE_TEXT,
        Self::MODE_TIME,
        Self::REJECTED,
        Self::INVALID_ALARM_ID,
    ];

    const fn new(name: &'static str, exact: &'static str, family: &'static str) -> Self {
        Self {
            name,
            exact,
            family,
        }
    }

    pub fn check(&self, response: &str) -> Match {
        let result = if response.contains(self.exact) {
            Match::Exact
        } else if response.contains(self.family) {
            Match::Family
        } else {
            Match::Missing
        };
        debug!("expectation {:?}: {:?} in {:?}", self.name, result, response);
        result
    }

    pub fn is_met(&self, response: &str) -> bool {
        self.check(response).is_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_family_and_missing() {
        let e = Expectation::ALARM_SET;
        assert_eq!(e.check("OK:ALARM_SET\r\n"), Match::Exact);
        assert_eq!(e.check("ALARM 0 UPDATED"), Match::Family);
        assert_eq!(e.check(""), Match::Missing);
        assert_eq!(e.check("alarm set"), Match::Missing);
    }

    #[test]
    fn family_is_contained_in_exact() {
        for e in Expectation::ALL {
            assert!(e.exact.contains(e.family), "{}", e.name);
            assert!(e.is_met(e.exact), "{}", e.name);
        }
    }

    #[test]
    fn generic_error_does_not_satisfy_specific_one() {
        assert!(Expectation::REJECTED.is_met("ERR:BAD_VALUE"));
        assert!(!Expectation::INVALID_ALARM_ID.is_met("ERR:BAD_VALUE"));
        assert!(Expectation::INVALID_ALARM_ID.is_met("ERR:INVALID_ALARM_ID\r\n"));
    }

    #[test]
    fn mode_markers_share_a_family() {
        assert_eq!(Expectation::MODE_TIME.check("OK:MODE_TEXT"), Match::Family);
        assert_eq!(Expectation::MODE_TEXT.check("OK:MODE_TEXT"), Match::Exact);
    }
}
