//! Shaft angle derived from the running edge count.

/// Edge counts produced by the encoder per motor-shaft revolution.
pub const ENCODER_COUNTS_PER_REV: i32 = 48;
/// Gear reduction between the motor shaft and the output wheel.
pub const GEAR_RATIO: i32 = 99;
/// Edge count for one full revolution of the output wheel.
pub const TICKS_PER_REV: i32 = GEAR_RATIO * ENCODER_COUNTS_PER_REV;

/// Wheel angle in hundredths of a degree, truncated toward zero.
///
/// Integer math keeps the conversion exact for whole revolutions and avoids
/// float formatting in the firmware.
pub fn centidegrees(count: i32) -> i64 {
    count as i64 * 36_000 / TICKS_PER_REV as i64
}
