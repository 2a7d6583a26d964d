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

//! District thumbnail gallery with a grid view and an auto-advancing slideshow.
//!
//! Clicking a thumbnail in the grid starts the slideshow at that image;
//! clicking the slideshow image goes back to the grid and stops the timer.
//! The timer is driven by elapsed time handed in from the frame loop, one
//! tick per full period.

use std::time::Duration;

use log::debug;

/// Default time between slideshow advances.
pub const DEFAULT_SLIDE_PERIOD: Duration = Duration::from_secs(5);

/// Which of the two gallery layouts is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryMode {
    Grid,
    Slideshow { cursor: usize },
}

/// Slideshow state machine over `len` images.
#[derive(Debug, Clone)]
pub struct SlideshowViewer {
    len: usize,
    mode: GalleryMode,
    period: Duration,
    /// Time accumulated towards the next tick; only meaningful in slideshow mode.
    elapsed: Duration,
}

impl SlideshowViewer {
    /// A viewer over `len` images in grid mode. A zero period falls back to the default.
    #[must_use]
    pub fn new(len: usize, period: Duration) -> Self {
        Self {
            len,
            mode: GalleryMode::Grid,
            period: if period.is_zero() {
                DEFAULT_SLIDE_PERIOD
            } else {
                period
            },
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn mode(&self) -> GalleryMode {
        self.mode
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.mode, GalleryMode::Slideshow { .. })
    }

    /// Current slideshow index, if running.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        match self.mode {
            GalleryMode::Slideshow { cursor } => Some(cursor),
            GalleryMode::Grid => None,
        }
    }

    /// Indices to render, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<usize> {
        match self.mode {
            GalleryMode::Grid => (0..self.len).collect(),
            GalleryMode::Slideshow { cursor } => vec![cursor],
        }
    }

    /// Handle a click on the image at `index`.
    pub fn click(&mut self, index: usize) {
        match self.mode {
            GalleryMode::Grid => self.start(index),
            GalleryMode::Slideshow { .. } => self.stop(),
        }
    }

    /// Enter slideshow mode at `index` and arm the timer.
    pub fn start(&mut self, index: usize) {
        if index >= self.len {
            debug!("Ignoring slideshow start at {} of {}", index, self.len);
            return;
        }
        self.mode = GalleryMode::Slideshow { cursor: index };
        self.elapsed = Duration::ZERO;
        debug!("Slideshow started at {}", index);
    }

    /// Cancel the timer and go back to the grid.
    pub fn stop(&mut self) {
        if self.is_running() {
            debug!("Slideshow stopped");
        }
        self.mode = GalleryMode::Grid;
        self.elapsed = Duration::ZERO;
    }

    /// Advance the cursor by one, wrapping at the end.
    pub fn tick(&mut self) {
        if let GalleryMode::Slideshow { cursor } = self.mode {
            self.mode = GalleryMode::Slideshow {
                cursor: (cursor + 1) % self.len,
            };
        }
    }

    /// Feed elapsed wall time; returns how many ticks fired.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.is_running() {
            return 0;
        }

        self.elapsed += dt;
        let mut ticks = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            self.tick();
            ticks += 1;
        }
        ticks
    }

    /// Time left before the next tick, if the timer is armed.
    #[must_use]
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.is_running()
            .then(|| self.period.saturating_sub(self.elapsed))
    }
}
