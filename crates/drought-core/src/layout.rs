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

//! Responsive side panel visibility.

/// Window width (in points) at or below which the panel can be collapsed.
pub const DEFAULT_BREAKPOINT: f32 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    breakpoint: f32,
    hidden: bool,
    width: f32,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::new(DEFAULT_BREAKPOINT)
    }
}

impl PanelLayout {
    #[must_use]
    pub fn new(breakpoint: f32) -> Self {
        Self {
            breakpoint,
            hidden: false,
            width: f32::INFINITY,
        }
    }

    /// Flip panel visibility.
    pub fn toggle(&mut self) {
        self.hidden = !self.hidden;
    }

    /// Record a new window width. Growing past the breakpoint brings the panel back.
    pub fn on_resize(&mut self, width: f32) {
        self.width = width;
        if width > self.breakpoint {
            self.hidden = false;
        }
    }

    #[must_use]
    pub fn panel_visible(&self) -> bool {
        !self.hidden
    }

    /// The toggle button only appears on narrow windows.
    #[must_use]
    pub fn toggle_visible(&self) -> bool {
        self.width <= self.breakpoint
    }
}
