// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Metric scale bar sizing.

/// Default maximum bar width in pixels.
pub const DEFAULT_MAX_WIDTH: f32 = 100.0;

/// A scale bar rounded to a readable distance.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBar {
    pub meters: f64,
    pub width_px: f32,
    pub label: String,
}

impl ScaleBar {
    /// Largest 1/2/3/5 x 10^n metre distance that fits in `max_width_px`.
    #[must_use]
    pub fn for_resolution(meters_per_pixel: f64, max_width_px: f32) -> Option<Self> {
        if !(meters_per_pixel.is_finite() && meters_per_pixel > 0.0 && max_width_px > 0.0) {
            return None;
        }

        let max_meters = meters_per_pixel * f64::from(max_width_px);
        let meters = round_down_nice(max_meters);
        let label = if meters < 1000.0 {
            format!("{meters} m")
        } else {
            format!("{} km", meters / 1000.0)
        };

        #[allow(clippy::cast_possible_truncation, reason = "bar width is at most max_width_px")]
        let width_px = (meters / meters_per_pixel) as f32;

        Some(Self {
            meters,
            width_px,
            label,
        })
    }
}

fn round_down_nice(value: f64) -> f64 {
    let pow10 = 10_f64.powf(value.log10().floor());
    let d = value / pow10;
    let nice = if d >= 10.0 {
        10.0
    } else if d >= 5.0 {
        5.0
    } else if d >= 3.0 {
        3.0
    } else if d >= 2.0 {
        2.0
    } else {
        1.0
    };
    pow10 * nice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilometre_bar() {
        // ~1.2 km per pixel, 100 px => 120 km => rounds to 100 km
        let bar = ScaleBar::for_resolution(1200.0, 100.0).unwrap();
        assert_eq!(bar.label, "100 km");
        assert!((bar.width_px - 83.333_336).abs() < 1e-3);
    }

    #[test]
    fn test_metre_bar() {
        let bar = ScaleBar::for_resolution(3.7, 100.0).unwrap();
        assert_eq!(bar.label, "300 m");
    }

    #[test]
    fn test_nice_steps() {
        assert_eq!(round_down_nice(4.9), 3.0);
        assert_eq!(round_down_nice(5.0), 5.0);
        assert_eq!(round_down_nice(2_345.0), 2_000.0);
        assert_eq!(round_down_nice(99.0), 50.0);
    }

    #[test]
    fn test_invalid_resolution() {
        assert!(ScaleBar::for_resolution(0.0, 100.0).is_none());
        assert!(ScaleBar::for_resolution(f64::NAN, 100.0).is_none());
    }
}
