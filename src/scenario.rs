//! The fixed list of scenarios run against the clock
//!
//! Each scenario covers one command family. Scenarios never stop the run on a failed check; the
//! result is recorded and the next scenario starts. Only connection errors and interrupts
//! propagate out of [run_scenarios].

use log::{debug, info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    commands::{Alarm, Command, DisplayMode, TextMode},
    device::SerialComm,
    expect::{Expectation, Match},
    Report, Result, Runner,
};

pub const BRIGHTNESS_LEVELS: [u8; 4] = [5, 10, 15, 8];

pub const MELODIES: [(u8, &str); 4] = [
    (0, "Default Melody"),
    (1, "Happy Birthday"),
    (2, "Alarm Sound"),
    (3, "Notification"),
];

/// Out of range for the firmware, which accepts 0 to 15
pub const INVALID_BRIGHTNESS: u8 = 99;

/// Out of range for the firmware, which has two alarm slots
pub const INVALID_ALARM: Alarm = Alarm {
    id: 5,
    hour: 8,
    minute: 30,
    enabled: true,
    melody: 0,
};

const ALARM_STEPS: [(Alarm, &str); 3] = [
    (
        Alarm {
            id: 0,
            hour: 8,
            minute: 30,
            enabled: true,
            melody: 2,
        },
        "Alarm 0 set successfully (08:30, enabled, melody 2)",
    ),
    (
        Alarm {
            id: 1,
            hour: 12,
            minute: 0,
            enabled: true,
            melody: 1,
        },
        "Alarm 1 set successfully (12:00, enabled, melody 1)",
    ),
    (
        Alarm {
            id: 0,
            hour: 8,
            minute: 30,
            enabled: false,
            melody: 2,
        },
        "Alarm 0 disabled successfully",
    ),
];

const SCROLL_TEXT: &str = "Hello Arduino!";
const STATIC_TEXT: &str = "STATIC";

/// A named group of exchanges with pass/fail checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    TimeSync,
    Brightness,
    Alarms,
    CustomText,
    Music,
    DisplayMode,
    InvalidCommands,
}

impl Scenario {
    /// Every scenario, in the order they are run
    pub const ALL: [Scenario; 7] = [
        Scenario::TimeSync,
        Scenario::Brightness,
        Scenario::Alarms,
        Scenario::CustomText,
        Scenario::Music,
        Scenario::DisplayMode,
        Scenario::InvalidCommands,
    ];

    /// Name used in the summary
    pub fn name(self) -> &'static str {
        match self {
            Self::TimeSync => "Time Sync",
            Self::Brightness => "Brightness",
            Self::Alarms => "Alarms",
            Self::CustomText => "Custom Text",
            Self::Music => "Music",
            Self::DisplayMode => "Display Mode",
            Self::InvalidCommands => "Invalid Commands",
        }
    }

    /// Short name for selecting the scenario on the command line
    pub fn key(self) -> &'static str {
        match self {
            Self::TimeSync => "time",
            Self::Brightness => "brightness",
            Self::Alarms => "alarms",
            Self::CustomText => "text",
            Self::Music => "music",
            Self::DisplayMode => "mode",
            Self::InvalidCommands => "invalid",
        }
    }

    /// Heading printed in the scenario's banner
    pub fn title(self) -> &'static str {
        match self {
            Self::TimeSync => "Time Synchronization",
            Self::Brightness => "Brightness Control",
            Self::Alarms => "Alarm Management",
            Self::CustomText => "Custom Text Display",
            Self::Music => "Music Control",
            Self::DisplayMode => "Display Mode Switching",
            Self::InvalidCommands => "Invalid Command Handling",
        }
    }

    /// Position in the fixed order, starting at 1
    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|s| *s == self)
            .map_or(0, |i| i + 1)
    }

    /// Look a scenario up by key or name, ignoring case
    pub fn find(name: &str) -> Option<Scenario> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.key().eq_ignore_ascii_case(name) || s.name().eq_ignore_ascii_case(name))
    }

    /// Run the scenario, returning whether it passed
    pub fn run<T: SerialComm>(self, runner: &mut Runner<T>) -> Result<bool> {
        runner
            .console()
            .banner(&format!("TEST {}: {}", self.number(), self.title()));
        info!("running scenario {:?}", self.name());

        match self {
            Self::TimeSync => time_sync(runner, unix_now()),
            Self::Brightness => brightness(runner),
            Self::Alarms => alarms(runner),
            Self::CustomText => custom_text(runner),
            Self::Music => music(runner),
            Self::DisplayMode => display_mode(runner),
            Self::InvalidCommands => invalid_commands(runner),
        }
    }
}

/// Run `scenarios` in order and collect their results
///
/// A failed scenario does not stop the run. An error (lost connection, interrupt) does.
pub fn run_scenarios<T: SerialComm>(
    runner: &mut Runner<T>,
    scenarios: &[Scenario],
) -> Result<Report> {
    let mut report = Report::default();
    for scenario in scenarios {
        let passed = scenario.run(runner)?;
        debug!("scenario {:?} passed: {}", scenario.name(), passed);
        report.record(scenario.name(), passed);
    }
    Ok(report)
}

/// Send the given Unix timestamp and expect the clock to confirm the sync
pub fn time_sync<T: SerialComm>(runner: &mut Runner<T>, timestamp: u64) -> Result<bool> {
    let response = runner.send(&Command::Time(timestamp))?;
    Ok(verify(
        runner,
        &response,
        Expectation::TIME_SYNCED,
        "Time sync successful",
        "Time sync failed",
    ))
}

fn brightness<T: SerialComm>(runner: &mut Runner<T>) -> Result<bool> {
    let mut all_passed = true;
    for level in BRIGHTNESS_LEVELS {
        let response = runner.send(&Command::Brightness(level))?;
        all_passed &= verify(
            runner,
            &response,
            Expectation::BRIGHTNESS_SET,
            &format!("Brightness set to {}", level),
            &format!("Failed to set brightness to {}", level),
        );
        runner.pause(runner.config().pacing.brightness_step)?;
    }
    Ok(all_passed)
}

fn alarms<T: SerialComm>(runner: &mut Runner<T>) -> Result<bool> {
    for (i, (alarm, success)) in ALARM_STEPS.iter().enumerate() {
        if i > 0 {
            runner.pause(runner.config().pacing.alarm_step)?;
        }
        let response = runner.send(&Command::Alarm(*alarm))?;
        let failure = if alarm.enabled {
            format!("Failed to set alarm {}", alarm.id)
        } else {
            format!("Failed to disable alarm {}", alarm.id)
        };
        if !verify(runner, &response, Expectation::ALARM_SET, success, &failure) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn custom_text<T: SerialComm>(runner: &mut Runner<T>) -> Result<bool> {
    let scroll = Command::Text {
        mode: TextMode::Scroll,
        payload: SCROLL_TEXT.to_owned(),
    };
    let response = runner.send(&scroll)?;
    if !verify(
        runner,
        &response,
        Expectation::TEXT_SET,
        "Scroll text set successfully",
        "Failed to set scroll text",
    ) {
        return Ok(false);
    }

    runner.pause(runner.config().pacing.text_step)?;

    let fixed = Command::Text {
        mode: TextMode::Static,
        payload: STATIC_TEXT.to_owned(),
    };
    let response = runner.send(&fixed)?;
    Ok(verify(
        runner,
        &response,
        Expectation::TEXT_SET,
        "Static text set successfully",
        "Failed to set static text",
    ))
}

fn music<T: SerialComm>(runner: &mut Runner<T>) -> Result<bool> {
    for (melody, name) in MELODIES {
        let response = runner.send(&Command::Music { play: true, melody })?;
        if !verify(
            runner,
            &response,
            Expectation::MUSIC_PLAYED,
            &format!("Played {}", name),
            &format!("Failed to play {}", name),
        ) {
            return Ok(false);
        }
        runner.pause(runner.config().pacing.melody_playback)?;

        // the stop acknowledgement is not checked
        runner.send(&Command::Music {
            play: false,
            melody: 0,
        })?;
        runner.pause(runner.config().pacing.melody_stop)?;
    }
    Ok(true)
}

fn display_mode<T: SerialComm>(runner: &mut Runner<T>) -> Result<bool> {
    let response = runner.send(&Command::Mode(DisplayMode::Text))?;
    if !verify(
        runner,
        &response,
        Expectation::MODE_TEXT,
        "Switched to TEXT mode",
        "Failed to switch to TEXT mode",
    ) {
        return Ok(false);
    }

    runner.pause(runner.config().pacing.mode_step)?;

    let response = runner.send(&Command::Mode(DisplayMode::Time))?;
    Ok(verify(
        runner,
        &response,
        Expectation::MODE_TIME,
        "Switched to TIME mode",
        "Failed to switch to TIME mode",
    ))
}

/// Informational only: the firmware may ignore bad values silently, so missing error markers
/// are reported but never fail the scenario
fn invalid_commands<T: SerialComm>(runner: &mut Runner<T>) -> Result<bool> {
    let response = runner.send(&Command::Brightness(INVALID_BRIGHTNESS))?;
    if Expectation::REJECTED.is_met(&response) {
        runner
            .console()
            .pass("Invalid brightness rejected correctly");
    } else {
        runner
            .console()
            .info("No error response for invalid brightness (may be handled silently)");
    }

    let response = runner.send(&Command::Alarm(INVALID_ALARM))?;
    if Expectation::INVALID_ALARM_ID.is_met(&response) {
        runner.console().pass("Invalid alarm ID rejected correctly");
    } else {
        runner.console().info("No error response for invalid alarm ID");
    }

    Ok(true)
}

/// Check `response` against `expectation` and print the outcome
fn verify<T: SerialComm>(
    runner: &Runner<T>,
    response: &str,
    expectation: Expectation,
    success: &str,
    failure: &str,
) -> bool {
    match expectation.check(response) {
        Match::Exact => {
            runner.console().pass(success);
            true
        }
        Match::Family => {
            debug!(
                "{:?} acknowledged without the exact {:?}",
                expectation.name, expectation.exact
            );
            runner.console().pass(success);
            true
        }
        Match::Missing => {
            warn!("no {:?} marker in {:?}", expectation.family, response);
            runner.console().fail(failure);
            false
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
