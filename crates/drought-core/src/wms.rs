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

//! Tile URL construction for XYZ templates and WMS GetMap requests.

use crate::mercator::{WebMercator, TILE_SIZE};

/// Default GeoServer WMS endpoint serving the drought rasters.
pub const DEFAULT_WMS_URL: &str = "http://localhost:8080/geoserver/drought/wms";

/// Default GeoServer workspace; layer names are `{workspace}:{year}_{month}`.
pub const DEFAULT_WORKSPACE: &str = "drought";

/// An `{s}`/`{x}`/`{y}`/`{z}` URL template with subdomain load balancing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XyzTemplate {
    pub template: String,
    pub subdomains: Vec<String>,
}

impl XyzTemplate {
    #[must_use]
    pub fn new(template: impl Into<String>, subdomains: Vec<String>) -> Self {
        Self {
            template: template.into(),
            subdomains,
        }
    }

    #[must_use]
    pub fn tile_url(&self, x: u32, y: u32, zoom: u8) -> String {
        let mut url = self
            .template
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string());

        if !self.subdomains.is_empty() {
            // Subdomain load balancing based on tile coordinates
            let index = ((u64::from(x) + u64::from(y)) % self.subdomains.len() as u64) as usize;
            url = url.replace("{s}", &self.subdomains[index]);
        }

        url
    }
}

/// Parameters of a transparent WMS overlay, one per drought layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmsRequest {
    pub base_url: String,
    pub layers: String,
    pub format: String,
    pub transparent: bool,
    pub version: String,
}

impl WmsRequest {
    /// A transparent PNG overlay for `layers` served from `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, layers: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            layers: layers.into(),
            format: "image/png".to_string(),
            transparent: true,
            version: "1.1.1".to_string(),
        }
    }

    /// The drought layer for one year/month pair.
    #[must_use]
    pub fn drought_layer(base_url: &str, workspace: &str, year: i32, month: &str) -> Self {
        Self::new(base_url, format!("{workspace}:{year}_{month}"))
    }

    /// GetMap URL for a single 256 px EPSG:3857 tile.
    #[must_use]
    pub fn tile_url(&self, x: u32, y: u32, zoom: u8) -> String {
        let (min_x, min_y, max_x, max_y) = WebMercator::tile_bbox(x, y, zoom);
        let separator = if self.base_url.contains('?') { '&' } else { '?' };

        format!(
            "{}{}service=WMS&request=GetMap&version={}&layers={}&styles=&format={}&transparent={}&width={TILE_SIZE}&height={TILE_SIZE}&srs=EPSG:3857&bbox={},{},{},{}",
            self.base_url,
            separator,
            self.version,
            self.layers,
            self.format,
            self.transparent,
            min_x,
            min_y,
            max_x,
            max_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mercator::ORIGIN_SHIFT;

    fn google() -> XyzTemplate {
        XyzTemplate::new(
            "http://{s}.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
            vec!["mt0".into(), "mt1".into(), "mt2".into(), "mt3".into()],
        )
    }

    #[test]
    fn test_xyz_substitution() {
        assert_eq!(
            google().tile_url(3, 2, 7),
            "http://mt1.google.com/vt/lyrs=s&x=3&y=2&z=7"
        );
    }

    #[test]
    fn test_subdomain_rotation() {
        let t = google();
        assert!(t.tile_url(0, 0, 1).starts_with("http://mt0."));
        assert!(t.tile_url(1, 0, 1).starts_with("http://mt1."));
        assert!(t.tile_url(1, 1, 1).starts_with("http://mt2."));
        assert!(t.tile_url(2, 1, 2).starts_with("http://mt3."));
        assert!(t.tile_url(2, 2, 2).starts_with("http://mt0."));
    }

    #[test]
    fn test_template_without_subdomains() {
        let t = XyzTemplate::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png", Vec::new());
        assert_eq!(t.tile_url(1, 2, 3), "https://tile.openstreetmap.org/3/1/2.png");
    }

    #[test]
    fn test_drought_layer_name() {
        let req = WmsRequest::drought_layer(DEFAULT_WMS_URL, DEFAULT_WORKSPACE, 2021, "03");
        assert_eq!(req.layers, "drought:2021_03");
        assert_eq!(req.format, "image/png");
        assert!(req.transparent);
    }

    #[test]
    fn test_world_tile_url() {
        let req = WmsRequest::drought_layer(DEFAULT_WMS_URL, DEFAULT_WORKSPACE, 2021, "03");
        let url = req.tile_url(0, 0, 0);
        assert!(url.starts_with("http://localhost:8080/geoserver/drought/wms?service=WMS&request=GetMap"));
        assert!(url.contains("&layers=drought:2021_03&"));
        assert!(url.contains("&transparent=true&"));
        assert!(url.contains("&width=256&height=256&srs=EPSG:3857&"));
        assert!(url.ends_with(&format!(
            "&bbox={},{},{},{}",
            -ORIGIN_SHIFT, -ORIGIN_SHIFT, ORIGIN_SHIFT, ORIGIN_SHIFT
        )));
    }

    #[test]
    fn test_existing_query_string() {
        let req = WmsRequest::new("http://example.com/wms?map=x", "a:b");
        assert!(req.tile_url(0, 0, 0).starts_with("http://example.com/wms?map=x&service=WMS"));
    }
}
