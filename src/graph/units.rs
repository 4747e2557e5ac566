//! Mapping between data values and pixel offsets for one render pass.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Affine mapping of an x/y value domain onto a `width` × `height` pixel area.
///
/// `y_top` is the value drawn at pixel row 0 and `y_bottom` the value at row
/// `height`; either may be the larger one. The x domain is POSIX seconds for
/// time charts. A zero-span domain yields non-finite pixels, so callers must
/// not build units from a single point or a flat range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    pub width: f64,
    pub height: f64,
    pub x_start: f64,
    pub x_end: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub x_per_unit: f64,
    pub y_per_unit: f64,
}

impl Units {
    pub fn new(width: f64, height: f64, x_start: f64, x_end: f64, y_top: f64, y_bottom: f64) -> Self {
        Self {
            width,
            height,
            x_start,
            x_end,
            y_top,
            y_bottom,
            x_per_unit: width / (x_end - x_start),
            y_per_unit: height / (y_top - y_bottom),
        }
    }

    /// Pixel offset of an x value; `x_start` maps to 0 and `x_end` to `width` exactly.
    pub fn x_to_pixel(&self, value: f64) -> f64 {
        (value - self.x_start) / (self.x_end - self.x_start) * self.width
    }

    pub fn pixel_to_x(&self, pixel: f64) -> f64 {
        pixel / self.x_per_unit + self.x_start
    }

    /// Pixel row of a y value, counted from the top.
    pub fn y_to_pixel(&self, value: f64) -> f64 {
        self.height - (value - self.y_bottom) / (self.y_top - self.y_bottom) * self.height
    }

    /// Value at `fraction` of the way from bottom (0) to top (1), for gridlines.
    pub fn y_fraction_to_value(&self, fraction: f64) -> f64 {
        self.y_bottom + fraction * (self.y_top - self.y_bottom)
    }

    /// Absolute size of the visible y range.
    pub fn range_size(&self) -> f64 {
        (self.y_top - self.y_bottom).abs()
    }

    /// Largest absolute y value shown, decides label abbreviation.
    pub fn max_abs_value(&self) -> f64 {
        self.y_top.abs().max(self.y_bottom.abs())
    }

    pub fn time_to_pixel(&self, time: &DateTime<Utc>) -> f64 {
        self.x_to_pixel(time.timestamp() as f64 + time.timestamp_subsec_nanos() as f64 * 1e-9)
    }

    /// Pixel of midnight UTC on a calendar date, `None` for an invalid date.
    pub fn date_to_pixel(&self, year: i32, month: u32, day: u32) -> Option<f64> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
        Some(self.time_to_pixel(&midnight))
    }

    /// Pixel of the first day of a month, where month 13 is January next year.
    pub fn month_to_pixel(&self, year: i32, month: u32) -> Option<f64> {
        if month > 12 {
            self.date_to_pixel(year + 1, month - 12, 1)
        } else {
            self.date_to_pixel(year, month, 1)
        }
    }

    /// Time at an x pixel offset, `None` outside chrono's range.
    pub fn pixel_to_time(&self, pixel: f64) -> Option<DateTime<Utc>> {
        let seconds = self.pixel_to_x(pixel);
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1e9) as u32;
        DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
    }
}
