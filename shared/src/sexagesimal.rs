//! Sexagesimal rendering of equatorial coordinates.
//!
//! The overlay table prints positions as colon-separated `h:mm:ss` and
//! `±d:mm:ss` strings with whole seconds. Rounding carries upward, so
//! 59.6 s rolls the minute rather than printing 60.

/// Formats a right ascension in degrees as `h:mm:ss`.
pub fn ra_deg_to_hms(ra_deg: f64) -> String {
    let hours = ra_deg.rem_euclid(360.0) / 15.0;
    let (h, m, s) = split_sexagesimal(hours);
    // 24:00:00 wraps back to the zero hour.
    let h = h % 24;
    format!("{h}:{m:02}:{s:02}")
}

/// Formats a declination in degrees as `±d:mm:ss`, always signed.
pub fn dec_deg_to_dms(dec_deg: f64) -> String {
    let sign = if dec_deg.is_sign_negative() { '-' } else { '+' };
    let (d, m, s) = split_sexagesimal(dec_deg.abs());
    format!("{sign}{d}:{m:02}:{s:02}")
}

/// Splits a non-negative value into whole units, minutes and seconds,
/// rounding to the nearest second and carrying overflow upward.
fn split_sexagesimal(value: f64) -> (u64, u64, u64) {
    let total_seconds = (value * 3600.0).round() as u64;
    (
        total_seconds / 3600,
        total_seconds % 3600 / 60,
        total_seconds % 60,
    )
}
