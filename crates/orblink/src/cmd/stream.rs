use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use orblink_conn::Event;
use orblink_device::codes::async_id;
use orblink_device::masks::{self, mask1};
use orblink_device::{AsyncMessageExt, ResponseExt};
use tracing::warn;

use crate::cmd::{await_reply, open_driver, StreamArgs};
use crate::config::Config;
use crate::exit::{
    command_error, conn_error, transport_error, CliError, CliResult, FAILURE, INTERNAL, SUCCESS,
};

/// Raw accelerometer + gyro, three axes each.
const CHANNELS: usize = 6;

pub fn run(args: StreamArgs, config: &Config) -> CliResult<i32> {
    let (mut driver, events) = open_driver(config)?;

    let mask = masks::combine(&[
        mask1::ACCEL_X_RAW,
        mask1::ACCEL_Y_RAW,
        mask1::ACCEL_Z_RAW,
        mask1::GYRO_X_RAW,
        mask1::GYRO_Y_RAW,
        mask1::GYRO_Z_RAW,
    ]);
    let divisor = (400 / args.rate.max(1)).max(1);

    let (reply_tx, reply_rx) = mpsc::channel();
    driver
        .set_data_streaming(divisor, 1, mask, 0, 0, Some(&reply_tx))
        .map_err(|err| conn_error("stream setup failed", err))?;
    let answer = await_reply(&reply_rx, Duration::from_secs(2))?;
    answer
        .status()
        .map_err(|err| command_error("stream setup rejected", err))?;

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed)).map_err(|err| {
            CliError::new(INTERNAL, format!("failed to install signal handler: {err}"))
        })?;
    }

    let mut printed = 0u64;
    while !stop.load(Ordering::Relaxed) {
        let event = match events.recv_timeout(Duration::from_millis(200)) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        match event {
            Event::Async(msg) if msg.id == async_id::SENSOR_DATA => {
                match msg.sensor_values(CHANNELS) {
                    Ok(v) => {
                        println!(
                            "accel=({} {} {}) gyro=({} {} {})",
                            v[0], v[1], v[2], v[3], v[4], v[5]
                        );
                        printed += 1;
                    }
                    Err(err) => warn!(error = %err, "unexpected sensor payload"),
                }
                if args.count.is_some_and(|limit| printed >= limit) {
                    break;
                }
            }
            Event::Async(msg) if msg.id == async_id::COLLISION_DETECTED => {
                match msg.collision() {
                    Ok(c) => println!(
                        "collision axis={} speed={} magnitude=({} {})",
                        c.axis, c.speed, c.x_magnitude, c.y_magnitude
                    ),
                    Err(err) => warn!(error = %err, "unexpected collision payload"),
                }
            }
            Event::Async(msg) if msg.id == async_id::POWER_NOTIFICATION => {
                if let Ok(ps) = msg.power_state() {
                    println!(
                        "power {:?} at {:.2} V",
                        ps.state,
                        f64::from(ps.battery_voltage) / 100.0
                    );
                }
            }
            Event::Async(_) => {}
            Event::Closed => {
                return Err(CliError::new(FAILURE, "robot closed the link"));
            }
            Event::ConnectionLost(err) => {
                return Err(transport_error("link lost", err));
            }
        }
    }

    // Best effort: stop the stream before hanging up.
    let _ = driver.set_data_streaming(divisor, 1, 0, 0, 0, None);
    driver.close();
    Ok(SUCCESS)
}
