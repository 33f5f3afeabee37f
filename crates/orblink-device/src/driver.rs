use std::sync::mpsc::{Sender, SyncSender};

use bytes::{BufMut, BytesMut};
use orblink_conn::{Connection, Event, Result};
use orblink_frame::AnswerFrame;
use orblink_transport::SerialConfig;

use crate::codes::{core_cmd, device, sphero_cmd};

/// Optional reply destination for one command.
///
/// Pass `None` for fire-and-forget; the device's answer, if any, is
/// dropped without consuming a pending-table slot.
pub type Reply<'a> = Option<&'a Sender<AnswerFrame>>;

/// The command catalogue: thin parameter marshalling over a [`Connection`].
///
/// Every method assigns a fresh sequence number and returns it; the answer
/// arrives later on the `reply` channel, tagged with that number. Check it
/// with [`ResponseExt::status`](crate::ResponseExt::status).
pub struct Driver {
    conn: Connection,
}

impl Driver {
    /// Open the robot's serial device and start the reader loop.
    pub fn open(config: &SerialConfig, events: SyncSender<Event>) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(config, events)?,
        })
    }

    /// Wrap an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection; see [`Connection::close`].
    pub fn close(&mut self) {
        self.conn.close();
    }

    fn send(&self, did: u8, cid: u8, data: &[u8], reply: Reply<'_>) -> Result<u8> {
        self.conn.send(did, cid, data, reply.cloned())
    }

    // Core

    pub fn ping(&self, reply: Reply<'_>) -> Result<u8> {
        self.send(device::CORE, core_cmd::PING, &[], reply)
    }

    pub fn get_version(&self, reply: Reply<'_>) -> Result<u8> {
        self.send(device::CORE, core_cmd::GET_VERSION, &[], reply)
    }

    pub fn get_power_state(&self, reply: Reply<'_>) -> Result<u8> {
        self.send(device::CORE, core_cmd::GET_POWER_STATE, &[], reply)
    }

    /// Enable or disable asynchronous power notifications.
    pub fn set_power_notify(&self, enabled: bool, reply: Reply<'_>) -> Result<u8> {
        self.send(
            device::CORE,
            core_cmd::SET_POWER_NOTIFY,
            &[u8::from(enabled)],
            reply,
        )
    }

    /// Put the robot to sleep. `wakeup_secs` of zero sleeps indefinitely;
    /// `macro_id` optionally runs a macro on wake, `orb_basic_line` an
    /// orbBasic program.
    pub fn sleep(
        &self,
        wakeup_secs: u16,
        macro_id: u8,
        orb_basic_line: u16,
        reply: Reply<'_>,
    ) -> Result<u8> {
        let mut data = BytesMut::with_capacity(5);
        data.put_u16(wakeup_secs);
        data.put_u8(macro_id);
        data.put_u16(orb_basic_line);
        self.send(device::CORE, core_cmd::SLEEP, &data, reply)
    }

    // Sphero

    /// Rotate the coordinate frame so the current orientation reads as
    /// `heading_degrees` (0-359).
    pub fn set_heading(&self, heading_degrees: u16, reply: Reply<'_>) -> Result<u8> {
        self.send(
            device::SPHERO,
            sphero_cmd::SET_HEADING,
            &heading_degrees.to_be_bytes(),
            reply,
        )
    }

    pub fn set_stabilization(&self, enabled: bool, reply: Reply<'_>) -> Result<u8> {
        self.send(
            device::SPHERO,
            sphero_cmd::SET_STABILIZATION,
            &[u8::from(enabled)],
            reply,
        )
    }

    /// Control system rotation rate, `0x01`..`0xFF` (about 8x the value in
    /// degrees per second).
    pub fn set_rotation_rate(&self, rate: u8, reply: Reply<'_>) -> Result<u8> {
        self.send(
            device::SPHERO,
            sphero_cmd::SET_ROTATION_RATE,
            &[rate],
            reply,
        )
    }

    pub fn self_level(
        &self,
        flags: u8,
        angle_limit: u8,
        timeout: u8,
        true_time: u8,
        reply: Reply<'_>,
    ) -> Result<u8> {
        self.send(
            device::SPHERO,
            sphero_cmd::SELF_LEVEL,
            &[flags, angle_limit, timeout, true_time],
            reply,
        )
    }

    /// Start (or stop, with a zero mask) sensor streaming.
    ///
    /// The device samples at 400 Hz divided by `divisor`, packs
    /// `frames_per_sample` frames per async message, and streams the
    /// channels selected by `mask`/`mask2` (see [`crate::masks`]).
    /// `packet_count` of zero streams forever.
    pub fn set_data_streaming(
        &self,
        divisor: u16,
        frames_per_sample: u16,
        mask: u32,
        packet_count: u8,
        mask2: u32,
        reply: Reply<'_>,
    ) -> Result<u8> {
        let mut data = BytesMut::with_capacity(13);
        data.put_u16(divisor);
        data.put_u16(frames_per_sample);
        data.put_u32(mask);
        data.put_u8(packet_count);
        data.put_u32(mask2);
        self.send(device::SPHERO, sphero_cmd::SET_DATA_STREAMING, &data, reply)
    }

    /// Configure impact detection. `method` of zero disables it;
    /// thresholds and speeds scale sensitivity per axis, `dead_time` is in
    /// 10 ms units.
    pub fn configure_collision_detection(
        &self,
        method: u8,
        x_threshold: u8,
        x_speed: u8,
        y_threshold: u8,
        y_speed: u8,
        dead_time: u8,
        reply: Reply<'_>,
    ) -> Result<u8> {
        self.send(
            device::SPHERO,
            sphero_cmd::SET_COLLISION_DETECTION,
            &[method, x_threshold, x_speed, y_threshold, y_speed, dead_time],
            reply,
        )
    }

    pub fn configure_locator(
        &self,
        flags: u8,
        x: u16,
        y: u16,
        yaw_tare: u16,
        reply: Reply<'_>,
    ) -> Result<u8> {
        let mut data = BytesMut::with_capacity(7);
        data.put_u8(flags);
        data.put_u16(x);
        data.put_u16(y);
        data.put_u16(yaw_tare);
        self.send(device::SPHERO, sphero_cmd::CONFIGURE_LOCATOR, &data, reply)
    }

    pub fn read_locator(&self, reply: Reply<'_>) -> Result<u8> {
        self.send(device::SPHERO, sphero_cmd::READ_LOCATOR, &[], reply)
    }

    /// Set the main LED color.
    pub fn set_rgb_led(&self, r: u8, g: u8, b: u8, reply: Reply<'_>) -> Result<u8> {
        // Flag 0x01 would persist the color as the "user LED color".
        self.send(
            device::SPHERO,
            sphero_cmd::SET_RGB_LED,
            &[r, g, b, 0x00],
            reply,
        )
    }

    /// Set the blue tail-light brightness.
    pub fn set_back_led(&self, brightness: u8, reply: Reply<'_>) -> Result<u8> {
        self.send(
            device::SPHERO,
            sphero_cmd::SET_BACK_LED,
            &[brightness],
            reply,
        )
    }

    /// Read back the user LED color; the answer payload decodes with
    /// [`ResponseExt::color`](crate::ResponseExt::color).
    pub fn get_rgb_led(&self, reply: Reply<'_>) -> Result<u8> {
        self.send(device::SPHERO, sphero_cmd::GET_RGB_LED, &[], reply)
    }

    /// Roll at `speed` toward `heading_degrees`. `state` 1 drives, 0
    /// brakes at the commanded heading.
    pub fn roll(&self, speed: u8, heading_degrees: u16, state: u8, reply: Reply<'_>) -> Result<u8> {
        let mut data = BytesMut::with_capacity(4);
        data.put_u8(speed);
        data.put_u16(heading_degrees);
        data.put_u8(state);
        self.send(device::SPHERO, sphero_cmd::ROLL, &data, reply)
    }

    /// Drive the motors directly, bypassing the control system. Modes:
    /// 0 off, 1 forward, 2 reverse, 3 brake, 4 ignore.
    pub fn set_raw_motors(
        &self,
        left_mode: u8,
        left_power: u8,
        right_mode: u8,
        right_power: u8,
        reply: Reply<'_>,
    ) -> Result<u8> {
        self.send(
            device::SPHERO,
            sphero_cmd::SET_RAW_MOTORS,
            &[left_mode, left_power, right_mode, right_power],
            reply,
        )
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver").field("conn", &self.conn).finish()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::io::Read;
    use std::os::unix::net::UnixStream;
    use std::sync::mpsc::sync_channel;
    use std::time::Duration;

    use orblink_conn::EVENT_SINK_CAPACITY;

    use super::*;

    /// Read one command frame off the device side of the socketpair.
    fn read_command(stream: &mut UnixStream) -> (u8, u8, u8, Vec<u8>) {
        let mut header = [0u8; 6];
        stream.read_exact(&mut header).unwrap();
        assert_eq!(&header[..2], &[0xFF, 0xFF]);
        let dlen = header[5] as usize;
        let mut rest = vec![0u8; dlen];
        stream.read_exact(&mut rest).unwrap();
        rest.pop();
        (header[2], header[3], header[4], rest)
    }

    fn driver() -> (Driver, UnixStream) {
        let (host_side, device_side) = UnixStream::pair().unwrap();
        host_side
            .set_read_timeout(Some(Duration::from_millis(20)))
            .unwrap();
        device_side
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();

        let reader = host_side.try_clone().unwrap();
        let (events_tx, _events_rx) = sync_channel(EVENT_SINK_CAPACITY);
        let conn = Connection::from_parts(reader, host_side, events_tx);
        (Driver::from_connection(conn), device_side)
    }

    #[test]
    fn ping_targets_core() {
        let (mut drv, mut dev) = driver();
        drv.ping(None).unwrap();
        let (did, cid, seq, payload) = read_command(&mut dev);
        assert_eq!((did, cid, seq), (0x00, 0x01, 1));
        assert!(payload.is_empty());
        drv.close();
    }

    #[test]
    fn sleep_marshals_big_endian() {
        let (mut drv, mut dev) = driver();
        drv.sleep(0x0102, 0x03, 0x0405, None).unwrap();
        let (did, cid, _, payload) = read_command(&mut dev);
        assert_eq!((did, cid), (0x00, 0x22));
        assert_eq!(payload, vec![0x01, 0x02, 0x03, 0x04, 0x05]);
        drv.close();
    }

    #[test]
    fn set_rgb_led_appends_user_flag() {
        let (mut drv, mut dev) = driver();
        drv.set_rgb_led(10, 20, 30, None).unwrap();
        let (did, cid, _, payload) = read_command(&mut dev);
        assert_eq!((did, cid), (0x02, 0x20));
        assert_eq!(payload, vec![10, 20, 30, 0x00]);
        drv.close();
    }

    #[test]
    fn set_back_led_and_get_rgb_led() {
        let (mut drv, mut dev) = driver();

        drv.set_back_led(0x7F, None).unwrap();
        let (did, cid, _, payload) = read_command(&mut dev);
        assert_eq!((did, cid), (0x02, 0x21));
        assert_eq!(payload, vec![0x7F]);

        drv.get_rgb_led(None).unwrap();
        let (did, cid, _, payload) = read_command(&mut dev);
        assert_eq!((did, cid), (0x02, 0x22));
        assert!(payload.is_empty());

        drv.close();
    }

    #[test]
    fn set_data_streaming_packs_thirteen_bytes() {
        let (mut drv, mut dev) = driver();
        drv.set_data_streaming(0x0102, 0x0304, 0xA0B0_C0D0, 5, 0x0102_0304, None)
            .unwrap();
        let (did, cid, _, payload) = read_command(&mut dev);
        assert_eq!((did, cid), (0x02, 0x11));
        assert_eq!(
            payload,
            vec![0x01, 0x02, 0x03, 0x04, 0xA0, 0xB0, 0xC0, 0xD0, 0x05, 0x01, 0x02, 0x03, 0x04]
        );
        drv.close();
    }

    #[test]
    fn roll_marshals_heading() {
        let (mut drv, mut dev) = driver();
        drv.roll(0x80, 0x01BC, 1, None).unwrap();
        let (did, cid, _, payload) = read_command(&mut dev);
        assert_eq!((did, cid), (0x02, 0x30));
        assert_eq!(payload, vec![0x80, 0x01, 0xBC, 0x01]);
        drv.close();
    }

    #[test]
    fn configure_collision_detection_order() {
        let (mut drv, mut dev) = driver();
        drv.configure_collision_detection(0x01, 0x40, 0x50, 0x60, 0x70, 0x0A, None)
            .unwrap();
        let (did, cid, _, payload) = read_command(&mut dev);
        assert_eq!((did, cid), (0x02, 0x12));
        assert_eq!(payload, vec![0x01, 0x40, 0x50, 0x60, 0x70, 0x0A]);
        drv.close();
    }

    #[test]
    fn configure_locator_and_read_locator() {
        let (mut drv, mut dev) = driver();

        drv.configure_locator(0x01, 0x0010, 0x0020, 0x005A, None)
            .unwrap();
        let (_, cid, _, payload) = read_command(&mut dev);
        assert_eq!(cid, 0x13);
        assert_eq!(payload, vec![0x01, 0x00, 0x10, 0x00, 0x20, 0x00, 0x5A]);

        drv.read_locator(None).unwrap();
        let (_, cid, _, payload) = read_command(&mut dev);
        assert_eq!(cid, 0x15);
        assert!(payload.is_empty());

        drv.close();
    }

    #[test]
    fn stabilization_and_heading() {
        let (mut drv, mut dev) = driver();

        drv.set_stabilization(false, None).unwrap();
        let (_, cid, _, payload) = read_command(&mut dev);
        assert_eq!(cid, 0x02);
        assert_eq!(payload, vec![0x00]);

        drv.set_heading(359, None).unwrap();
        let (_, cid, _, payload) = read_command(&mut dev);
        assert_eq!(cid, 0x01);
        assert_eq!(payload, vec![0x01, 0x67]);

        drv.close();
    }

    #[test]
    fn reply_channel_receives_the_answer() {
        use bytes::BytesMut;
        use orblink_frame::encode_answer;
        use std::io::Write;
        use std::sync::mpsc;

        let (mut drv, mut dev) = driver();
        let (reply_tx, reply_rx) = mpsc::channel();

        let seq = drv.ping(Some(&reply_tx)).unwrap();
        let _ = read_command(&mut dev);

        let mut buf = BytesMut::new();
        encode_answer(0x00, seq, &[], &mut buf).unwrap();
        dev.write_all(&buf).unwrap();

        let answer = reply_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(answer.seq, seq);
        assert_eq!(answer.code, 0x00);

        drv.close();
    }
}
