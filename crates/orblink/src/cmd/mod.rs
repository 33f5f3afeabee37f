use std::sync::mpsc::{sync_channel, Receiver};
use std::time::Duration;

use clap::{Args, Subcommand};
use orblink_conn::{Event, EVENT_SINK_CAPACITY};
use orblink_device::Driver;
use orblink_frame::AnswerFrame;

use crate::config::Config;
use crate::exit::{conn_error, CliError, CliResult, TIMEOUT, USAGE};

pub mod color;
pub mod ping;
pub mod sleep;
pub mod stream;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the link round-trip.
    Ping(PingArgs),
    /// Set the main LED color.
    SetColor(SetColorArgs),
    /// Read back the user LED color.
    GetColor(GetColorArgs),
    /// Put the robot to sleep.
    Sleep(SleepArgs),
    /// Stream IMU sensor data until interrupted.
    Stream(StreamArgs),
}

pub fn run(command: Command, config: &Config) -> CliResult<i32> {
    match command {
        Command::Ping(args) => ping::run(args, config),
        Command::SetColor(args) => color::set(args, config),
        Command::GetColor(args) => color::get(args, config),
        Command::Sleep(args) => sleep::run(args, config),
        Command::Stream(args) => stream::run(args, config),
    }
}

#[derive(Args, Debug)]
pub struct PingArgs {
    /// Number of pings to send.
    #[arg(long, default_value_t = 1)]
    pub count: u32,
    /// Maximum time to wait for each answer (e.g. 5s, 500ms).
    #[arg(long, default_value = "2s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct SetColorArgs {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// Maximum time to wait for the answer (e.g. 5s, 500ms).
    #[arg(long, default_value = "2s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct GetColorArgs {
    /// Maximum time to wait for the answer (e.g. 5s, 500ms).
    #[arg(long, default_value = "2s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct SleepArgs {
    /// Seconds until the robot wakes again; 0 sleeps indefinitely.
    #[arg(long, default_value_t = 0)]
    pub wakeup: u16,
    /// Maximum time to wait for the answer (e.g. 5s, 500ms).
    #[arg(long, default_value = "2s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Samples per second (device rate 400 Hz divided down).
    #[arg(long, default_value_t = 10)]
    pub rate: u16,
    /// Stop after N samples instead of waiting for ctrl-c.
    #[arg(long)]
    pub count: Option<u64>,
}

pub(crate) fn open_driver(config: &Config) -> CliResult<(Driver, Receiver<Event>)> {
    let (events_tx, events_rx) = sync_channel(EVENT_SINK_CAPACITY);
    let driver = Driver::open(&config.serial, events_tx)
        .map_err(|err| conn_error("failed to open the robot", err))?;
    Ok((driver, events_rx))
}

pub(crate) fn await_reply(
    reply_rx: &Receiver<AnswerFrame>,
    timeout: Duration,
) -> CliResult<AnswerFrame> {
    reply_rx
        .recv_timeout(timeout)
        .map_err(|_| CliError::new(TIMEOUT, "timed out waiting for the robot's answer"))
}

pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("").is_err());
    }
}
