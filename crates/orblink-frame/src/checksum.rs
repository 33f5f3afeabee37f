/// Mod-256 sum of the bytes, bit-inverted (one's complement).
///
/// Stamped on every outgoing frame and validated on every incoming one.
/// Covers the bytes between the start marker and the checksum byte itself.
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, &b| sum.wrapping_add(b)) ^ 0xFF
}
