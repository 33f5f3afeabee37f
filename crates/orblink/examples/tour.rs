//! Connect to the robot, ping it, blink the LED, and put it to sleep.
//!
//! ```sh
//! cargo run --example tour -- /dev/rfcomm0
//! ```

use std::sync::mpsc::{self, sync_channel};
use std::time::Duration;

use orblink::conn::{Event, EVENT_SINK_CAPACITY};
use orblink::device::{Driver, ResponseExt};
use orblink::transport::SerialConfig;

const REPLY_TIMEOUT: Duration = Duration::from_secs(2);

fn main() {
    let port = match std::env::args().nth(1) {
        Some(port) => port,
        None => {
            eprintln!("usage: tour <serial-port>");
            std::process::exit(2);
        }
    };

    let (events_tx, events_rx) = sync_channel(EVENT_SINK_CAPACITY);
    std::thread::spawn(move || {
        for event in events_rx {
            match event {
                Event::Async(msg) => {
                    println!("async id=0x{:02X} ({} bytes)", msg.id, msg.payload.len())
                }
                Event::Closed => {
                    println!("link closed");
                    break;
                }
                Event::ConnectionLost(err) => {
                    eprintln!("link lost: {err}");
                    break;
                }
            }
        }
    });

    println!("Connecting...");
    let mut driver =
        Driver::open(&SerialConfig::new(port), events_tx).expect("failed to open the robot");

    let (reply_tx, reply_rx) = mpsc::channel();

    println!("Pinging...");
    driver.ping(Some(&reply_tx)).expect("ping send failed");
    let pong = reply_rx.recv_timeout(REPLY_TIMEOUT).expect("no pong");
    pong.status().expect("ping rejected");

    println!("Setting color...");
    driver
        .set_rgb_led(0, 0, 255, Some(&reply_tx))
        .expect("set-color send failed");
    reply_rx
        .recv_timeout(REPLY_TIMEOUT)
        .expect("no set-color answer")
        .status()
        .expect("set-color rejected");

    println!("Getting color...");
    driver
        .get_rgb_led(Some(&reply_tx))
        .expect("get-color send failed");
    let answer = reply_rx
        .recv_timeout(REPLY_TIMEOUT)
        .expect("no get-color answer");
    let color = answer.color().expect("unexpected color payload");
    println!("Color is {} {} {}", color.r, color.g, color.b);

    println!("Sleeping...");
    driver.sleep(0, 0, 0, Some(&reply_tx)).expect("sleep send failed");
    let _ = reply_rx.recv_timeout(REPLY_TIMEOUT);

    println!("Closing...");
    driver.close();
    println!("Done.");
}
