use clap::{builder::FalseyValueParser, ArgAction, Parser};
use log::{debug, error};
use std::{
    process::ExitCode,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use dgt_clock_tester::{
    device::SerialPort,
    scenario::{self, Scenario},
    Config, Console, Error, Report, Runner, DEFAULT_PORT,
};

/// Exercise a DGT clock's serial command interface
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Serial device the clock is connected to
    #[arg(short, long, env = "DGT_PORT", default_value = DEFAULT_PORT)]
    port: String,

    /// Baud rate of the serial connection
    #[arg(short, long, env = "DGT_BAUD", default_value_t = 9600)]
    baud: u32,

    /// Longest time to collect a response, in milliseconds
    #[arg(long, default_value_t = 1500)]
    window_ms: u64,

    /// Delay between sending a command and reading, in milliseconds
    #[arg(long, default_value_t = 500)]
    settle_ms: u64,

    /// Stop collecting a response at the first line break instead of waiting out the window
    #[arg(long)]
    stop_on_terminator: bool,

    /// Disable coloured output
    #[arg(long, env = "NO_COLOR", action = ArgAction::SetTrue, value_parser = FalseyValueParser::new())]
    no_color: bool,

    /// Only run these scenarios (by key or name); may be repeated
    #[arg(long, value_name = "SCENARIO")]
    only: Vec<String>,

    /// List the scenarios and exit
    #[arg(long)]
    list: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            port: self.port.clone(),
            baud_rate: self.baud,
            response_window: Duration::from_millis(self.window_ms),
            settle_delay: Duration::from_millis(self.settle_ms),
            stop_on_terminator: self.stop_on_terminator,
            color: !self.no_color,
            ..Config::default()
        }
    }

    fn scenarios(&self) -> Result<Vec<Scenario>, String> {
        if self.only.is_empty() {
            return Ok(Scenario::ALL.to_vec());
        }
        let mut selected = Vec::new();
        for name in &self.only {
            selected.push(Scenario::find(name).ok_or_else(|| format!("unknown scenario {:?}", name))?);
        }
        Ok(Scenario::ALL
            .into_iter()
            .filter(|s| selected.contains(s))
            .collect())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.list {
        for scenario in Scenario::ALL {
            println!("{:<12} {}", scenario.key(), scenario.name());
        }
        return ExitCode::SUCCESS;
    }

    let config = args.config();
    let console = Console::new(config.color);
    let scenarios = match args.scenarios() {
        Ok(scenarios) => scenarios,
        Err(e) => {
            console.fail(&e);
            return ExitCode::FAILURE;
        }
    };

    console.banner("DGT CLOCK FIRMWARE TEST SUITE");
    println!("Port: {}", config.port);
    println!("Baud Rate: {}", config.baud_rate);
    println!("Time: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    console.rule();

    match run(config, &console, &scenarios) {
        Ok(report) => {
            report.print_summary(&console);
            console.info("Serial connection closed");
            ExitCode::from(report.exit_code())
        }
        Err(Error::Device(e)) => {
            error!("connection failed: {:?}", e);
            console.fail(&format!("Serial error: {}", e));
            console.info("Is the clock connected and not in use by another program?");
            ExitCode::FAILURE
        }
        Err(Error::Interrupted) => {
            console.info("Test interrupted by user");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("run failed: {:?}", e);
            console.fail(&format!("Unexpected error: {}", e));
            ExitCode::FAILURE
        }
    }
}

/// Open the port, run the scenarios and close the port again, whatever the outcome
fn run(config: Config, console: &Console, scenarios: &[Scenario]) -> Result<Report, Error> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

    console.info("Opening serial connection...");
    let port = SerialPort::new(&config.port, config.baud_rate, config.read_timeout)?;
    debug!("opened {:?}", port.name());

    let port_name = config.port.clone();
    let mut runner = Runner::new(port, config).with_interrupt(interrupted);
    runner.prepare()?;
    console.pass(&format!("Connected to {}", port_name));

    scenario::run_scenarios(&mut runner, scenarios)
}
