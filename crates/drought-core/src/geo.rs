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

//! Geographic primitives shared by the grid, popups and the map glue.

use std::fmt;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    /// Three decimals, matching the corner labels and popup anchors.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}, {:.3}", round3(self.lat), round3(self.lng))
    }
}

/// Round to three decimals with ties away from zero, as corner labels expect.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Visible map rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Viewport {
    #[must_use]
    pub const fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Build a viewport from two arbitrary opposite corners.
    ///
    /// Screen space has latitude growing downwards, so the map glue hands us
    /// the top-left and bottom-right corners; this normalises them.
    #[must_use]
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    #[must_use]
    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    #[must_use]
    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    #[must_use]
    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    #[must_use]
    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    /// Corners in label order: south-west, south-east, north-east, north-west.
    #[must_use]
    pub fn corners(&self) -> [LatLng; 4] {
        [
            LatLng::new(self.south(), self.west()),
            LatLng::new(self.south(), self.east()),
            LatLng::new(self.north(), self.east()),
            LatLng::new(self.north(), self.west()),
        ]
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south() + self.north()) / 2.0,
            (self.west() + self.east()) / 2.0,
        )
    }

    /// True when both viewports agree within `epsilon` degrees on every edge.
    #[must_use]
    pub fn approx_eq(&self, other: &Viewport, epsilon: f64) -> bool {
        (self.south() - other.south()).abs() <= epsilon
            && (self.west() - other.west()).abs() <= epsilon
            && (self.north() - other.north()).abs() <= epsilon
            && (self.east() - other.east()).abs() <= epsilon
    }
}
