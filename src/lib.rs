//! Crate for exercising the serial command interface of a DGT clock
//!
//! The clock firmware accepts short ASCII commands framed as `<BODY>\n` and answers with a line
//! such as `OK:BRIGHTNESS_SET`. A [Runner] owns the serial connection and performs one
//! send-and-collect exchange at a time; the [scenario] module drives it through a fixed list of
//! checks, one per command family, and gathers the results into a [Report].
//!
//! # Usage
//! ```no_run
//! use dgt_clock_tester::{device::SerialPort, scenario, Config, Runner};
//!
//! fn main() -> Result<(), dgt_clock_tester::Error> {
//!     let config = Config::default();
//!     let port = SerialPort::new(&config.port, config.baud_rate, config.read_timeout)?;
//!     let mut runner = Runner::new(port, config);
//!     runner.prepare()?;
//!     let report = scenario::run_scenarios(&mut runner, &scenario::Scenario::ALL)?;
//!     std::process::exit(report.exit_code().into());
//! }
//! ```

#![forbid(unsafe_code)]

pub mod commands;

pub mod device;

pub mod expect;

pub mod scenario;

mod config;
pub use config::{Config, Pacing, DEFAULT_PORT};

mod console;
pub use console::Console;

mod error;
pub use error::Error;
use error::Result;

mod report;
pub use report::Report;

mod runner;
pub use runner::{decode, Runner};
