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

//! Spherical (Web) Mercator projection utilities.

/// Tile edge length in pixels.
pub const TILE_SIZE: u32 = 256;

/// Half the circumference of the EPSG:3857 sphere, in metres.
pub const ORIGIN_SHIFT: f64 = 20_037_508.342_789_244;

/// Web Mercator projection utilities
#[derive(Debug)]
pub struct WebMercator;

impl WebMercator {
    /// Ground resolution of one pixel at `zoom`, measured along the equator.
    #[must_use]
    pub fn resolution(zoom: f64) -> f64 {
        2.0 * ORIGIN_SHIFT / (f64::from(TILE_SIZE) * 2_f64.powf(zoom))
    }

    /// Metres per pixel at a given latitude.
    #[must_use]
    pub fn ground_resolution(lat: f64, zoom: f64) -> f64 {
        Self::resolution(zoom) * lat.to_radians().cos()
    }

    /// Bounding box of a tile in EPSG:3857 metres: `(min_x, min_y, max_x, max_y)`.
    #[must_use]
    pub fn tile_bbox(x: u32, y: u32, zoom: u8) -> (f64, f64, f64, f64) {
        let tile_span = 2.0 * ORIGIN_SHIFT / 2_f64.powi(i32::from(zoom));
        let min_x = f64::from(x) * tile_span - ORIGIN_SHIFT;
        let max_x = f64::from(x + 1) * tile_span - ORIGIN_SHIFT;
        let max_y = ORIGIN_SHIFT - f64::from(y) * tile_span;
        let min_y = ORIGIN_SHIFT - f64::from(y + 1) * tile_span;
        (min_x, min_y, max_x, max_y)
    }
}
