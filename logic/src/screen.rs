//! Text rendering for the two display lines.
//!
//! Both views regenerate their lines from scratch every refresh and pad them
//! with spaces to the full column width, so a shorter value overwrites
//! whatever the previous refresh left on the panel.

use core::fmt::Write;

use heapless::String;

use crate::angle;

/// Visible columns on the character display.
pub const COLUMNS: usize = 16;

/// One display line. The buffer is wider than the panel: the degree glyph
/// takes two bytes in UTF-8 while occupying a single cell, and a runaway
/// count may format wider than the panel (the display clips it).
pub type Line = String<32>;

/// Sensor view: raw potentiometer and temperature readings.
pub fn sensor_lines(pot: u16, temp: u16) -> (Line, Line) {
    let mut first = Line::new();
    let mut second = Line::new();
    write!(first, "Pot: {pot:4}").unwrap();
    write!(second, "Temp: {temp:4}").unwrap();
    pad(&mut first);
    pad(&mut second);
    (first, second)
}

/// Position view: derived wheel angle and the raw edge count.
pub fn position_lines(count: i32) -> (Line, Line) {
    let centi = angle::centidegrees(count);
    let sign = if centi < 0 { "-" } else { "" };
    let whole = (centi / 100).unsigned_abs();
    let frac = (centi % 100).unsigned_abs();

    let mut first = Line::new();
    let mut second = Line::new();
    write!(first, "Angle: {sign}{whole}.{frac:02}°").unwrap();
    write!(second, "Count: {count}").unwrap();
    pad(&mut first);
    pad(&mut second);
    (first, second)
}

fn pad(line: &mut Line) {
    while line.chars().count() < COLUMNS {
        if line.push(' ').is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_lines_name_both_channels() {
        let (first, second) = sensor_lines(1023, 512);
        assert_eq!(first.as_str(), "Pot: 1023       ");
        assert_eq!(second.as_str(), "Temp:  512      ");
    }

    #[test]
    fn position_lines_show_angle_and_count() {
        let (first, second) = position_lines(1188);
        assert_eq!(first.as_str(), "Angle: 90.00°   ");
        assert_eq!(second.as_str(), "Count: 1188     ");
    }

    #[test]
    fn full_revolution_reads_360() {
        let (first, _) = position_lines(4752);
        assert_eq!(first.as_str(), "Angle: 360.00°  ");
    }

    #[test]
    fn negative_counts_carry_a_sign() {
        let (first, second) = position_lines(-1188);
        assert_eq!(first.as_str(), "Angle: -90.00°  ");
        assert_eq!(second.as_str(), "Count: -1188    ");
    }

    #[test]
    fn sub_degree_angles_keep_two_decimals() {
        // One tick is 7 centidegrees after truncation.
        let (first, _) = position_lines(1);
        assert_eq!(first.as_str(), "Angle: 0.07°    ");
        let (first, _) = position_lines(-1);
        assert_eq!(first.as_str(), "Angle: -0.07°   ");
    }

    #[test]
    fn all_lines_cover_the_full_width() {
        for (first, second) in [
            sensor_lines(0, 0),
            sensor_lines(4095, 4095),
            position_lines(0),
            position_lines(i32::MAX),
            position_lines(i32::MIN),
        ] {
            assert!(first.chars().count() >= COLUMNS);
            assert!(second.chars().count() >= COLUMNS);
        }
    }
}
