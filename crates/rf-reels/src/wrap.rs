//! Modular wrap-around for scrolling strips
//!
//! A strip is an endless loop of `strip_height` pixels. While it moves, its
//! position is kept inside the band `[rest_y - strip_height, rest_y]` so the
//! viewport always shows contiguous, in-bounds cells.

/// Reduce `y` into `[rest_y - strip_height, rest_y]` by whole strip heights.
///
/// A non-positive `strip_height` (empty strip) returns `y` unchanged.
#[inline]
pub fn reduce_to_band(y: f64, rest_y: f64, strip_height: f64) -> f64 {
    if strip_height.is_nan() || strip_height <= 0.0 || !y.is_finite() {
        return y;
    }

    let low = rest_y - strip_height;
    let mut y = y;

    // Far outliers jump most of the way in one step; the loops finish the job.
    if y < low - strip_height || y > rest_y + strip_height {
        let turns = ((rest_y - y) / strip_height).floor();
        y += turns * strip_height;
    }

    while y < low {
        y += strip_height;
    }
    while y > rest_y {
        y -= strip_height;
    }
    y
}

/// Whether `y` lies inside the wrap band
#[inline]
pub fn in_band(y: f64, rest_y: f64, strip_height: f64) -> bool {
    y >= rest_y - strip_height && y <= rest_y
}
