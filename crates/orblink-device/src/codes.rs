//! Protocol identifier tables.
//!
//! Values come from the Orbotix API specification. Commands are grouped by
//! the device id they are addressed to.

/// Device ids addressed by the DID byte of a command frame.
pub mod device {
    pub const CORE: u8 = 0x00;
    pub const BOOTLOADER: u8 = 0x01;
    pub const SPHERO: u8 = 0x02;
}

/// Core commands (DID `0x00`).
pub mod core_cmd {
    pub const PING: u8 = 0x01;
    pub const GET_VERSION: u8 = 0x02;
    pub const CONTROL_UART_TX: u8 = 0x03;
    pub const SET_BT_NAME: u8 = 0x10;
    pub const GET_BT_NAME: u8 = 0x11;
    pub const SET_AUTO_RECONNECT: u8 = 0x12;
    pub const GET_AUTO_RECONNECT: u8 = 0x13;
    pub const GET_POWER_STATE: u8 = 0x20;
    pub const SET_POWER_NOTIFY: u8 = 0x21;
    pub const SLEEP: u8 = 0x22;
    pub const GET_POWER_TRIPS: u8 = 0x23;
    pub const SET_POWER_TRIPS: u8 = 0x24;
    pub const SET_INACTIVE_TIMER: u8 = 0x25;
    pub const GOTO_BOOTLOADER: u8 = 0x30;
    pub const RUN_L1_DIAGS: u8 = 0x40;
    pub const RUN_L2_DIAGS: u8 = 0x41;
    pub const CLEAR_COUNTERS: u8 = 0x42;
    pub const ASSIGN_TIME: u8 = 0x50;
    pub const POLL_TIMES: u8 = 0x51;
}

/// Bootloader commands (DID `0x01`).
pub mod bootloader_cmd {
    pub const BEGIN_REFLASH: u8 = 0x02;
    pub const HERE_IS_PAGE: u8 = 0x03;
    pub const LEAVE_BOOTLOADER: u8 = 0x04;
    pub const IS_PAGE_BLANK: u8 = 0x05;
    pub const ERASE_USER_CONFIG: u8 = 0x06;
}

/// Sphero commands (DID `0x02`).
pub mod sphero_cmd {
    pub const SET_HEADING: u8 = 0x01;
    pub const SET_STABILIZATION: u8 = 0x02;
    pub const SET_ROTATION_RATE: u8 = 0x03;
    pub const SET_BALL_REG_WEBSITE: u8 = 0x04;
    pub const GET_BALL_REG_WEBSITE: u8 = 0x05;
    pub const REENABLE_DEMO: u8 = 0x06;
    pub const GET_CHASSIS_ID: u8 = 0x07;
    pub const SET_CHASSIS_ID: u8 = 0x08;
    pub const SELF_LEVEL: u8 = 0x09;
    pub const SET_VDL: u8 = 0x0A;
    pub const SET_DATA_STREAMING: u8 = 0x11;
    pub const SET_COLLISION_DETECTION: u8 = 0x12;
    pub const CONFIGURE_LOCATOR: u8 = 0x13;
    pub const SET_ACCELEROMETER_RANGE: u8 = 0x14;
    pub const READ_LOCATOR: u8 = 0x15;
    pub const SET_RGB_LED: u8 = 0x20;
    pub const SET_BACK_LED: u8 = 0x21;
    pub const GET_RGB_LED: u8 = 0x22;
    pub const ROLL: u8 = 0x30;
    pub const BOOST: u8 = 0x31;
    pub const MOVE: u8 = 0x32;
    pub const SET_RAW_MOTORS: u8 = 0x33;
    pub const SET_MOTION_TIMEOUT: u8 = 0x34;
    pub const SET_OPTIONS_FLAGS: u8 = 0x35;
    pub const GET_OPTIONS_FLAGS: u8 = 0x36;
    pub const SET_TEMP_OPTIONS_FLAGS: u8 = 0x37;
    pub const GET_TEMP_OPTIONS_FLAGS: u8 = 0x38;
    pub const GET_CONFIG_BLOCK: u8 = 0x40;
    pub const SET_DEVICE_MODE: u8 = 0x42;
    pub const SET_CONFIG_BLOCK: u8 = 0x43;
    pub const GET_DEVICE_MODE: u8 = 0x44;
    pub const RUN_MACRO: u8 = 0x50;
    pub const SAVE_TEMP_MACRO: u8 = 0x51;
    pub const SAVE_MACRO: u8 = 0x52;
    pub const INIT_MACRO_EXECUTIVE: u8 = 0x54;
    pub const ABORT_MACRO: u8 = 0x55;
    pub const MACRO_STATUS: u8 = 0x56;
    pub const SET_MACRO_PARAMETER: u8 = 0x57;
    pub const APPEND_TEMP_MACRO_CHUNK: u8 = 0x58;
    pub const ERASE_ORBBASIC: u8 = 0x60;
    pub const APPEND_ORBBASIC_FRAGMENT: u8 = 0x61;
    pub const EXECUTE_ORBBASIC: u8 = 0x62;
    pub const ABORT_ORBBASIC: u8 = 0x63;
    pub const ANSWER_INPUT: u8 = 0x64;
}

/// Message response codes carried in an answer frame's code byte.
pub mod response {
    /// Command succeeded.
    pub const OK: u8 = 0x00;
    pub const GENERAL_ERROR: u8 = 0x01;
    pub const CHECKSUM_FAILURE: u8 = 0x02;
    pub const COMMAND_FRAGMENT: u8 = 0x03;
    pub const BAD_COMMAND: u8 = 0x04;
    pub const UNSUPPORTED: u8 = 0x05;
    pub const BAD_MESSAGE: u8 = 0x06;
    pub const INVALID_PARAMETER: u8 = 0x07;
    pub const EXECUTION_FAILED: u8 = 0x08;
    pub const BAD_DEVICE: u8 = 0x09;
    /// Voltage too low for reflash operation.
    pub const POWER_TOO_LOW: u8 = 0x31;
    pub const ILLEGAL_PAGE: u8 = 0x32;
    pub const FLASH_FAILED: u8 = 0x33;
    pub const APPLICATION_CORRUPT: u8 = 0x34;
    pub const MESSAGE_TIMEOUT: u8 = 0x35;
}

/// Async message id codes.
pub mod async_id {
    pub const POWER_NOTIFICATION: u8 = 0x01;
    pub const LEVEL1_DIAGNOSTIC: u8 = 0x02;
    pub const SENSOR_DATA: u8 = 0x03;
    pub const CONFIG_BLOCK_CONTENTS: u8 = 0x04;
    /// Pre-sleep warning, sent 10 seconds before sleep.
    pub const PRE_SLEEP_WARNING: u8 = 0x05;
    pub const MACRO_MARKERS: u8 = 0x06;
    pub const COLLISION_DETECTED: u8 = 0x07;
    pub const ORBBASIC_PRINT: u8 = 0x08;
    pub const ORBBASIC_ERROR_ASCII: u8 = 0x09;
    pub const ORBBASIC_ERROR_BINARY: u8 = 0x0A;
    pub const SELF_LEVEL_RESULT: u8 = 0x0B;
    /// Firmware 3.10 and later.
    pub const GYRO_AXIS_LIMIT_EXCEEDED: u8 = 0x0C;
}

/// Battery state codes reported in the power state record.
pub mod battery {
    pub const CHARGING: u8 = 0x01;
    pub const OK: u8 = 0x02;
    pub const LOW: u8 = 0x03;
    pub const CRITICAL: u8 = 0x04;
}
