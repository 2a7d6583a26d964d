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

//! Attribute popups shown when the map is clicked.

use crate::geo::LatLng;

/// Ordered `(field, value)` pairs describing a location.
pub type AttributeRecord = Vec<(String, String)>;

/// Looks up attribute data for a map location.
pub trait AttributeSource {
    fn lookup(&self, position: LatLng) -> AttributeRecord;
}

/// Echoes the clicked coordinate back as two fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClickCoordinates;

impl AttributeSource for ClickCoordinates {
    fn lookup(&self, position: LatLng) -> AttributeRecord {
        vec![
            ("Latitude".to_string(), format!("{:.4}", position.lat)),
            ("Longitude".to_string(), format!("{:.4}", position.lng)),
        ]
    }
}

/// Returns the same record for every location.
#[derive(Debug, Default, Clone)]
pub struct StaticAttributes(pub AttributeRecord);

impl AttributeSource for StaticAttributes {
    fn lookup(&self, _position: LatLng) -> AttributeRecord {
        self.0.clone()
    }
}

/// A two-row table anchored at the clicked point.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributePopup {
    pub anchor: LatLng,
    pub headers: Vec<String>,
    pub values: Vec<String>,
}

impl AttributePopup {
    /// Query `source` at `anchor` and lay the result out as header and data rows.
    pub fn build(anchor: LatLng, source: &dyn AttributeSource) -> Self {
        let (headers, values) = source.lookup(anchor).into_iter().unzip();
        Self {
            anchor,
            headers,
            values,
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.headers.len()
    }
}
