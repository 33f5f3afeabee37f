//! Typed views over answer and async frame payloads.
//!
//! Every decoder validates the payload length against the record's exact
//! encoded size before touching a byte, and multi-byte fields are read
//! big-endian field by field.

use orblink_frame::{AnswerFrame, AsyncFrame};

use crate::error::{CommandError, DecodeError};

/// RGB LED color, the answer payload of get-color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WIRE_SIZE: usize = 3;

    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        expect_size("Color", Self::WIRE_SIZE, payload)?;
        Ok(Self {
            r: payload[0],
            g: payload[1],
            b: payload[2],
        })
    }
}

/// High-level battery state from the power manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryState {
    Charging,
    Ok,
    Low,
    Critical,
}

impl BatteryState {
    pub fn from_code(code: u8) -> Result<Self, DecodeError> {
        use crate::codes::battery;
        match code {
            battery::CHARGING => Ok(Self::Charging),
            battery::OK => Ok(Self::Ok),
            battery::LOW => Ok(Self::Low),
            battery::CRITICAL => Ok(Self::Critical),
            value => Err(DecodeError::Value {
                record: "PowerState",
                field: "state",
                value,
            }),
        }
    }
}

/// Power state record (get-power-state answer, power notifications).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerState {
    pub record_version: u8,
    pub state: BatteryState,
    /// Battery voltage in hundredths of a volt; `0x02EF` is 7.51 V.
    pub battery_voltage: u16,
    /// Recharges in the life of the robot.
    pub charge_count: u16,
    /// Seconds awake since the last recharge.
    pub seconds_since_charge: u16,
}

impl PowerState {
    pub const WIRE_SIZE: usize = 8;

    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        expect_size("PowerState", Self::WIRE_SIZE, payload)?;
        Ok(Self {
            record_version: payload[0],
            state: BatteryState::from_code(payload[1])?,
            battery_voltage: be_u16(payload, 2),
            charge_count: be_u16(payload, 4),
            seconds_since_charge: be_u16(payload, 6),
        })
    }
}

/// Locator record (read-locator answer, locator streaming).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub x: u16,
    pub y: u16,
    pub x_velocity: u16,
    pub y_velocity: u16,
    pub speed_over_ground: u16,
}

impl Location {
    pub const WIRE_SIZE: usize = 10;

    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        expect_size("Location", Self::WIRE_SIZE, payload)?;
        Ok(Self {
            x: be_u16(payload, 0),
            y: be_u16(payload, 2),
            x_velocity: be_u16(payload, 4),
            y_velocity: be_u16(payload, 6),
            speed_over_ground: be_u16(payload, 8),
        })
    }
}

/// Collision-detected async record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    /// Impact axis bitfield: bit 0 = X, bit 1 = Y.
    pub axis: u8,
    pub x_magnitude: i16,
    pub y_magnitude: i16,
    pub speed: u8,
    /// Device millisecond clock at impact.
    pub timestamp_ms: u32,
}

impl Collision {
    pub const WIRE_SIZE: usize = 16;

    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        expect_size("Collision", Self::WIRE_SIZE, payload)?;
        Ok(Self {
            x: be_i16(payload, 0),
            y: be_i16(payload, 2),
            z: be_i16(payload, 4),
            axis: payload[6],
            x_magnitude: be_i16(payload, 7),
            y_magnitude: be_i16(payload, 9),
            speed: payload[11],
            timestamp_ms: be_u32(payload, 12),
        })
    }
}

/// Decode a sensor-data streaming payload of `count` big-endian `i16`s.
///
/// `count` is the number of channels selected by the streaming masks; the
/// payload must be exactly `2 * count` bytes.
pub fn decode_sensor_values(payload: &[u8], count: usize) -> Result<Vec<i16>, DecodeError> {
    expect_size("SensorData", count * 2, payload)?;
    Ok((0..count).map(|i| be_i16(payload, i * 2)).collect())
}

/// Typed accessors for answer frames.
pub trait ResponseExt {
    /// The command outcome encoded in the response code.
    fn status(&self) -> Result<(), CommandError>;
    /// Decode the payload as a [`Color`] record.
    fn color(&self) -> Result<Color, DecodeError>;
    /// Decode the payload as a [`PowerState`] record.
    fn power_state(&self) -> Result<PowerState, DecodeError>;
    /// Decode the payload as a [`Location`] record.
    fn location(&self) -> Result<Location, DecodeError>;
}

impl ResponseExt for AnswerFrame {
    fn status(&self) -> Result<(), CommandError> {
        CommandError::check(self.code)
    }

    fn color(&self) -> Result<Color, DecodeError> {
        Color::decode(&self.payload)
    }

    fn power_state(&self) -> Result<PowerState, DecodeError> {
        PowerState::decode(&self.payload)
    }

    fn location(&self) -> Result<Location, DecodeError> {
        Location::decode(&self.payload)
    }
}

/// Typed accessors for async frames.
pub trait AsyncMessageExt {
    /// Decode the payload as a [`PowerState`] record.
    fn power_state(&self) -> Result<PowerState, DecodeError>;
    /// Decode the payload as a [`Location`] record.
    fn location(&self) -> Result<Location, DecodeError>;
    /// Decode the payload as a [`Collision`] record.
    fn collision(&self) -> Result<Collision, DecodeError>;
    /// Decode the payload as `count` streamed sensor channels.
    fn sensor_values(&self, count: usize) -> Result<Vec<i16>, DecodeError>;
}

impl AsyncMessageExt for AsyncFrame {
    fn power_state(&self) -> Result<PowerState, DecodeError> {
        PowerState::decode(&self.payload)
    }

    fn location(&self) -> Result<Location, DecodeError> {
        Location::decode(&self.payload)
    }

    fn collision(&self) -> Result<Collision, DecodeError> {
        Collision::decode(&self.payload)
    }

    fn sensor_values(&self, count: usize) -> Result<Vec<i16>, DecodeError> {
        decode_sensor_values(&self.payload, count)
    }
}

fn expect_size(record: &'static str, expected: usize, payload: &[u8]) -> Result<(), DecodeError> {
    if payload.len() != expected {
        return Err(DecodeError::Size {
            record,
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

fn be_u16(payload: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([payload[at], payload[at + 1]])
}

fn be_i16(payload: &[u8], at: usize) -> i16 {
    i16::from_be_bytes([payload[at], payload[at + 1]])
}

fn be_u32(payload: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([
        payload[at],
        payload[at + 1],
        payload[at + 2],
        payload[at + 3],
    ])
}
