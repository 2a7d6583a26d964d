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

//! Selectable years/months and the district thumbnail list.

use chrono::{Datelike, Local};
use thiserror::Error;

/// First year with drought rasters on the map server.
pub const DEFAULT_FIRST_YEAR: i32 = 2000;

/// Directory holding the per-district time series thumbnails.
pub const DEFAULT_THUMBNAIL_DIR: &str = "timeseries";

/// Districts with a time series thumbnail, in gallery order.
pub const DEFAULT_DISTRICTS: [&str; 60] = [
    "Bulawayo", "Harare", "Buhera", "Chimanimani", "Chipinge", "Makoni", "Mutare", "Mutasa",
    "Nyanga", "Bindura", "Muzarabani", "Guruve", "Mazowe", "Mount Darwin", "Rushinga", "Shamva",
    "Chikomba", "Goromonzi", "Marondera", "Mudzi", "Murehwa", "Mutoko", "Seke", "UMP", "Wedza",
    "Chegutu", "Hurungwe", "Kadoma", "Kariba", "Makonde", "Zvimba", "Bikita", "Chiredzi", "Chivi",
    "Gutu", "Masvingo", "Mwenezi", "Zaka", "Binga", "Bubi", "Hwange", "Lupane", "Nkayi",
    "Tsholotsho", "Umguza", "Beitbridge", "Bulilima", "Gwanda", "Insiza", "Mangwe", "Matobo",
    "Umzingwane", "Chirumhanzu", "GokweNorth", "GokweSouth", "Gweru", "Kwekwe", "Mberengwa",
    "Shurugwi", "Zvishavane",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("first year {first} is after last year {last}")]
    EmptyYearRange { first: i32, last: i32 },

    #[error("district list is empty")]
    NoDistricts,
}

/// Inclusive range of selectable years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    first_year: i32,
    last_year: i32,
}

impl DateRange {
    pub fn new(first_year: i32, last_year: i32) -> Result<Self, CatalogError> {
        if first_year > last_year {
            return Err(CatalogError::EmptyYearRange {
                first: first_year,
                last: last_year,
            });
        }
        Ok(Self {
            first_year,
            last_year,
        })
    }

    /// `first_year` up to the current calendar year.
    pub fn through_current_year(first_year: i32) -> Result<Self, CatalogError> {
        Self::new(first_year, Local::now().year())
    }

    #[must_use]
    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    #[must_use]
    pub fn last_year(&self) -> i32 {
        self.last_year
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.first_year..=self.last_year
    }

    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        (self.first_year..=self.last_year).contains(&year)
    }

    /// Zero-padded month values `"01"` to `"12"`.
    #[must_use]
    pub fn months() -> Vec<String> {
        (1..=12).map(|m| format!("{m:02}")).collect()
    }
}

/// A district name and its thumbnail path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictImage {
    pub name: String,
    pub path: String,
}

/// The ordered, immutable district image set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictCatalog {
    images: Vec<DistrictImage>,
}

impl Default for DistrictCatalog {
    fn default() -> Self {
        Self {
            images: DEFAULT_DISTRICTS
                .iter()
                .map(|name| image_for(DEFAULT_THUMBNAIL_DIR, name))
                .collect(),
        }
    }
}

impl DistrictCatalog {
    pub fn new<S: AsRef<str>>(dir: &str, names: &[S]) -> Result<Self, CatalogError> {
        if names.is_empty() {
            return Err(CatalogError::NoDistricts);
        }
        Ok(Self {
            images: names.iter().map(|n| image_for(dir, n.as_ref())).collect(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DistrictImage> {
        self.images.get(index)
    }

    /// Thumbnail path for the district at `index`.
    #[must_use]
    pub fn image_path(&self, index: usize) -> Option<&str> {
        self.images.get(index).map(|image| image.path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DistrictImage> {
        self.images.iter()
    }
}

fn image_for(dir: &str, name: &str) -> DistrictImage {
    let dir = dir.trim_end_matches('/');
    let path = if dir.is_empty() {
        format!("{name}.png")
    } else {
        format!("{dir}/{name}.png")
    };
    DistrictImage {
        name: name.to_string(),
        path,
    }
}
