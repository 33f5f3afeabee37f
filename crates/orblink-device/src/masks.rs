//! Data-streaming mask bits for the set-data-streaming command.
//!
//! `mask1` selects raw and filtered IMU/motor channels, `mask2` the
//! quaternion/odometer/velocity channels. Streamed values arrive as
//! big-endian `i16`s in mask bit order, most significant bit first.

/// First mask word.
pub mod mask1 {
    pub const ACCEL_X_RAW: u32 = 0x8000_0000;
    pub const ACCEL_Y_RAW: u32 = 0x4000_0000;
    pub const ACCEL_Z_RAW: u32 = 0x2000_0000;

    pub const GYRO_X_RAW: u32 = 0x1000_0000;
    pub const GYRO_Y_RAW: u32 = 0x0800_0000;
    pub const GYRO_Z_RAW: u32 = 0x0400_0000;

    pub const MOTOR_RIGHT_EMF_RAW: u32 = 0x0040_0000;
    pub const MOTOR_LEFT_EMF_RAW: u32 = 0x0020_0000;

    pub const MOTOR_LEFT_PWM_RAW: u32 = 0x0010_0000;
    pub const MOTOR_RIGHT_PWM_RAW: u32 = 0x0008_0000;

    pub const IMU_PITCH_FILTERED: u32 = 0x0004_0000;
    pub const IMU_ROLL_FILTERED: u32 = 0x0002_0000;
    pub const IMU_YAW_FILTERED: u32 = 0x0001_0000;

    pub const ACCEL_X_FILTERED: u32 = 0x0000_8000;
    pub const ACCEL_Y_FILTERED: u32 = 0x0000_4000;
    pub const ACCEL_Z_FILTERED: u32 = 0x0000_2000;

    pub const GYRO_X_FILTERED: u32 = 0x0000_1000;
    pub const GYRO_Y_FILTERED: u32 = 0x0000_0800;
    pub const GYRO_Z_FILTERED: u32 = 0x0000_0400;

    pub const MOTOR_RIGHT_EMF_FILTERED: u32 = 0x0000_0040;
    pub const MOTOR_LEFT_EMF_FILTERED: u32 = 0x0000_0020;
}

/// Second mask word.
pub mod mask2 {
    pub const QUATERNION_Q0: u32 = 0x8000_0000;
    pub const QUATERNION_Q1: u32 = 0x4000_0000;
    pub const QUATERNION_Q2: u32 = 0x2000_0000;
    pub const QUATERNION_Q3: u32 = 0x1000_0000;
    pub const ODOMETER_X: u32 = 0x0800_0000;
    pub const ODOMETER_Y: u32 = 0x0400_0000;
    pub const ACCEL_ONE: u32 = 0x0200_0000;
    pub const VELOCITY_X: u32 = 0x0100_0000;
    pub const VELOCITY_Y: u32 = 0x0080_0000;
}

/// OR a set of mask bits into one mask word.
pub fn combine(masks: &[u32]) -> u32 {
    masks.iter().fold(0, |acc, &m| acc | m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_ors_bits() {
        let mask = combine(&[mask1::ACCEL_X_RAW, mask1::ACCEL_Y_RAW, mask1::GYRO_Z_RAW]);
        assert_eq!(mask, 0xC400_0000);
    }

    #[test]
    fn combine_empty_is_zero() {
        assert_eq!(combine(&[]), 0);
    }
}
