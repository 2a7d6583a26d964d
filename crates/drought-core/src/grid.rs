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

//! Latitude/longitude grid overlay.
//!
//! The grid is regenerated from scratch every time the viewport settles:
//! horizontal lines at every `interval` degrees of latitude, vertical lines
//! at every `interval` degrees of longitude, and one coordinate label at
//! each of the four viewport corners.

use log::debug;
use thiserror::Error;

use crate::geo::{LatLng, Viewport};

/// Default spacing between grid lines in degrees.
pub const DEFAULT_GRID_INTERVAL: f64 = 1.0;

/// Finest accepted grid spacing in degrees.
pub const MIN_GRID_INTERVAL: f64 = 0.01;

/// Errors raised when building a grid generator.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid interval for {axis} must be positive and finite, got {value}")]
    InvalidInterval { axis: &'static str, value: f64 },

    #[error("grid interval for {axis} must be at least 0.01 degrees, got {value}")]
    IntervalTooSmall { axis: &'static str, value: f64 },
}

/// Orientation of a grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Constant latitude, spans the visible longitude range.
    Horizontal,
    /// Constant longitude, spans the visible latitude range.
    Vertical,
}

/// A single straight grid segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub axis: Axis,
    /// The latitude (horizontal) or longitude (vertical) this line sits on.
    pub value: f64,
    pub start: LatLng,
    pub end: LatLng,
}

/// A permanent coordinate label pinned to a viewport corner.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerLabel {
    pub position: LatLng,
    pub text: String,
}

impl CornerLabel {
    fn at(position: LatLng) -> Self {
        Self {
            position,
            text: position.to_string(),
        }
    }
}

/// The full set of drawable grid primitives for one viewport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridOverlay {
    pub lines: Vec<GridLine>,
    pub labels: Vec<CornerLabel>,
}

impl GridOverlay {
    pub fn horizontal(&self) -> impl Iterator<Item = &GridLine> {
        self.lines.iter().filter(|l| l.axis == Axis::Horizontal)
    }

    pub fn vertical(&self) -> impl Iterator<Item = &GridLine> {
        self.lines.iter().filter(|l| l.axis == Axis::Vertical)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.labels.is_empty()
    }

    /// Drop every line and label.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.labels.clear();
    }
}

/// Produces grid overlays for a fixed pair of intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGenerator {
    lat_interval: f64,
    lon_interval: f64,
}

impl Default for GridGenerator {
    fn default() -> Self {
        Self {
            lat_interval: DEFAULT_GRID_INTERVAL,
            lon_interval: DEFAULT_GRID_INTERVAL,
        }
    }
}

impl GridGenerator {
    pub fn new(lat_interval: f64, lon_interval: f64) -> Result<Self, GridError> {
        validate_interval("latitude", lat_interval)?;
        validate_interval("longitude", lon_interval)?;
        Ok(Self {
            lat_interval,
            lon_interval,
        })
    }

    #[must_use]
    pub fn lat_interval(&self) -> f64 {
        self.lat_interval
    }

    #[must_use]
    pub fn lon_interval(&self) -> f64 {
        self.lon_interval
    }

    /// Build every grid line and corner label covering `viewport`.
    #[must_use]
    pub fn generate(&self, viewport: &Viewport) -> GridOverlay {
        let mut lines = Vec::new();

        for lat in steps(viewport.south(), viewport.north(), self.lat_interval) {
            lines.push(GridLine {
                axis: Axis::Horizontal,
                value: lat,
                start: LatLng::new(lat, viewport.west()),
                end: LatLng::new(lat, viewport.east()),
            });
        }

        for lon in steps(viewport.west(), viewport.east(), self.lon_interval) {
            lines.push(GridLine {
                axis: Axis::Vertical,
                value: lon,
                start: LatLng::new(viewport.south(), lon),
                end: LatLng::new(viewport.north(), lon),
            });
        }

        let labels = viewport.corners().into_iter().map(CornerLabel::at).collect();

        GridOverlay { lines, labels }
    }
}

fn validate_interval(axis: &'static str, value: f64) -> Result<(), GridError> {
    if !(value.is_finite() && value > 0.0) {
        Err(GridError::InvalidInterval { axis, value })
    } else if value < MIN_GRID_INTERVAL {
        Err(GridError::IntervalTooSmall { axis, value })
    } else {
        Ok(())
    }
}

/// Values `floor(low / interval) * interval + i * interval` while `<= high`.
fn steps(low: f64, high: f64, interval: f64) -> impl Iterator<Item = f64> {
    let start = (low / interval).floor() * interval;
    (0_u32..)
        .map(move |i| start + f64::from(i) * interval)
        .take_while(move |v| *v <= high)
}

/// Grid overlay plus the viewport it was last drawn for.
#[derive(Debug, Clone, Default)]
pub struct GridState {
    generator: GridGenerator,
    overlay: GridOverlay,
    drawn_for: Option<Viewport>,
    redraws: u64,
}

impl GridState {
    #[must_use]
    pub fn new(generator: GridGenerator) -> Self {
        Self {
            generator,
            ..Default::default()
        }
    }

    /// Clear the previous overlay and redraw it for `viewport`.
    pub fn redraw(&mut self, viewport: Viewport) {
        self.overlay.clear();
        self.overlay = self.generator.generate(&viewport);
        self.drawn_for = Some(viewport);
        self.redraws += 1;
        debug!(
            "Grid redrawn: {} lines, {} labels",
            self.overlay.lines.len(),
            self.overlay.labels.len()
        );
    }

    #[must_use]
    pub fn overlay(&self) -> &GridOverlay {
        &self.overlay
    }

    #[must_use]
    pub fn drawn_for(&self) -> Option<&Viewport> {
        self.drawn_for.as_ref()
    }

    /// Number of full redraws since creation.
    #[must_use]
    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}

/// Tolerance in degrees below which two viewports count as identical.
const SETTLE_EPSILON: f64 = 1e-9;

/// Turns a per-frame stream of viewports into "view settled" notifications.
///
/// A viewport settles once it is unchanged for two consecutive frames with
/// no drag or zoom gesture in progress, and differs from the last settled one.
#[derive(Debug, Clone, Default)]
pub struct SettleDetector {
    previous: Option<Viewport>,
    settled: Option<Viewport>,
}

impl SettleDetector {
    /// Feed this frame's viewport; returns it when it has just come to rest.
    pub fn observe(&mut self, viewport: Viewport, interacting: bool) -> Option<Viewport> {
        let steady = self
            .previous
            .is_some_and(|p| p.approx_eq(&viewport, SETTLE_EPSILON));
        self.previous = Some(viewport);

        if interacting || !steady {
            return None;
        }
        if self
            .settled
            .is_some_and(|s| s.approx_eq(&viewport, SETTLE_EPSILON))
        {
            return None;
        }

        self.settled = Some(viewport);
        Some(viewport)
    }

    /// The last observed viewport has not been reported as settled yet.
    #[must_use]
    pub fn pending(&self) -> bool {
        match (self.previous, self.settled) {
            (Some(p), Some(s)) => !p.approx_eq(&s, SETTLE_EPSILON),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Record `viewport` as already handled, e.g. after the startup draw.
    pub fn mark_settled(&mut self, viewport: Viewport) {
        self.previous = Some(viewport);
        self.settled = Some(viewport);
    }
}
