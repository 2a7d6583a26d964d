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

//! Overlay layer registry and layer-control synchronisation.
//!
//! The registry maps a layer key to an overlay entry. Drought layers are keyed
//! `{year}_{month}` while the built-in grid overlay lives under
//! [`GRID_OVERLAY_NAME`]. Every mutation rebuilds the [`LayerControl`]
//! snapshot so the legend widget never shows stale entries.
//!
//! Note on the "view" action: [`LayerRegistry::update_selection`] only removes
//! entries whose key contains [`DROUGHT_MARKER`], but drought layers are
//! stored without that marker. Previously viewed layers therefore stay on the
//! map. That behavior is kept unless `replace_previous` is enabled, which
//! removes every WMS layer before adding the new one.

use log::{debug, info, warn};
use thiserror::Error;

use crate::wms::{WmsRequest, XyzTemplate, DEFAULT_WMS_URL, DEFAULT_WORKSPACE};

/// Registry key of the coordinate grid overlay.
pub const GRID_OVERLAY_NAME: &str = "Grid Overlay";

/// Marker the "view" action looks for when clearing old drought layers.
pub const DROUGHT_MARKER: &str = "drought:";

/// Errors raised when decoding a marked drought key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayerKeyError {
    #[error("layer key has no 'drought:' marker: {0}")]
    MissingMarker(String),

    #[error("layer key is not of the form year_month: {0}")]
    Malformed(String),

    #[error("invalid year in layer key: {0}")]
    InvalidYear(String),
}

/// Registry key for a year/month pair.
#[must_use]
pub fn layer_key(year: i32, month: &str) -> String {
    format!("{year}_{month}")
}

/// Decode `drought:{year}_{month}` into its year and month parts.
pub fn parse_marked_key(key: &str) -> Result<(i32, String), LayerKeyError> {
    let (_, rest) = key
        .split_once(':')
        .ok_or_else(|| LayerKeyError::MissingMarker(key.to_string()))?;
    let mut parts = rest.split('_');
    let year = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| LayerKeyError::Malformed(key.to_string()))?;
    let month = parts
        .next()
        .ok_or_else(|| LayerKeyError::Malformed(key.to_string()))?;
    let year = year
        .parse::<i32>()
        .map_err(|e| LayerKeyError::InvalidYear(format!("{key} ({e})")))?;
    Ok((year, month.to_string()))
}

/// Something the map can draw as an overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayKind {
    /// The latitude/longitude grid lines.
    Grid,
    /// A remote WMS tile layer.
    Wms(WmsRequest),
}

/// A registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLayer {
    pub kind: OverlayKind,
    /// Whether the overlay is currently attached to the map.
    pub visible: bool,
}

impl OverlayLayer {
    #[must_use]
    pub fn is_wms(&self) -> bool {
        matches!(self.kind, OverlayKind::Wms(_))
    }
}

/// A selectable background imagery layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseLayer {
    pub name: String,
    pub template: XyzTemplate,
    pub max_zoom: u8,
    pub attribution: String,
}

impl BaseLayer {
    /// Satellite imagery used as the default background.
    #[must_use]
    pub fn google_satellite() -> Self {
        Self {
            name: "Google Satellite".to_string(),
            template: XyzTemplate::new(
                "http://{s}.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
                ["mt0", "mt1", "mt2", "mt3"].iter().map(|s| (*s).to_string()).collect(),
            ),
            max_zoom: 20,
            attribution: "Africa Regional Centre for Space Science Education in English".to_string(),
        }
    }
}

/// The map collaborator that actually draws overlays.
pub trait OverlayHost {
    /// Put `layer` on the map under `key`, replacing whatever was there.
    fn attach(&mut self, key: &str, layer: &OverlayLayer);

    /// Take the overlay under `key` off the map. Unknown keys are ignored.
    fn detach(&mut self, key: &str);
}

/// One overlay row in the layer control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEntry {
    pub name: String,
    pub visible: bool,
}

/// Snapshot rendered by the layer-selection widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayerControl {
    pub base_layers: Vec<String>,
    pub active_base: usize,
    pub overlays: Vec<ControlEntry>,
    /// Incremented on every rebuild.
    pub generation: u64,
}

/// The year and month picked in the side panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub year: Option<i32>,
    pub month: Option<String>,
}

impl Selection {
    #[must_use]
    pub fn new(year: i32, month: impl Into<String>) -> Self {
        Self {
            year: Some(year),
            month: Some(month.into()),
        }
    }

    /// Both halves, if both are chosen.
    #[must_use]
    pub fn complete(&self) -> Option<(i32, &str)> {
        match (self.year, self.month.as_deref()) {
            (Some(year), Some(month)) if !month.is_empty() => Some((year, month)),
            _ => None,
        }
    }
}

/// Settings for a [`LayerRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub wms_url: String,
    pub workspace: String,
    pub base_layers: Vec<BaseLayer>,
    pub show_grid: bool,
    pub replace_previous: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            wms_url: DEFAULT_WMS_URL.to_string(),
            workspace: DEFAULT_WORKSPACE.to_string(),
            base_layers: vec![BaseLayer::google_satellite()],
            show_grid: true,
            replace_previous: false,
        }
    }
}

/// Active overlays plus the layer control derived from them.
#[derive(Debug)]
pub struct LayerRegistry {
    wms_url: String,
    workspace: String,
    base_layers: Vec<BaseLayer>,
    active_base: usize,
    /// Insertion ordered; overwriting keeps the original position.
    overlays: Vec<(String, OverlayLayer)>,
    control: Option<LayerControl>,
    generation: u64,
    replace_previous: bool,
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl LayerRegistry {
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        let base_layers = if config.base_layers.is_empty() {
            warn!("No base layers configured, falling back to Google Satellite");
            vec![BaseLayer::google_satellite()]
        } else {
            config.base_layers
        };

        Self {
            wms_url: config.wms_url,
            workspace: config.workspace,
            base_layers,
            active_base: 0,
            overlays: vec![(
                GRID_OVERLAY_NAME.to_string(),
                OverlayLayer {
                    kind: OverlayKind::Grid,
                    visible: config.show_grid,
                },
            )],
            control: None,
            generation: 0,
            replace_previous: config.replace_previous,
        }
    }

    /// Attach every visible overlay to a freshly created map, then build the control.
    pub fn attach_all(&mut self, host: &mut impl OverlayHost) {
        for (key, layer) in &self.overlays {
            if layer.visible {
                host.attach(key, layer);
            }
        }
        self.refresh_control();
    }

    /// Add (or overwrite) the drought layer for `year`/`month` and show it.
    pub fn add_layer(&mut self, year: i32, month: &str, host: &mut impl OverlayHost) {
        let key = layer_key(year, month);
        let layer = OverlayLayer {
            kind: OverlayKind::Wms(WmsRequest::drought_layer(
                &self.wms_url,
                &self.workspace,
                year,
                month,
            )),
            visible: true,
        };

        if let Some(slot) = self.overlays.iter_mut().find(|(k, _)| *k == key) {
            debug!("Overwriting overlay '{}'", key);
            host.detach(&key);
            slot.1 = layer;
        } else {
            self.overlays.push((key.clone(), layer));
        }

        if let Some(entry) = self.get(&key) {
            host.attach(&key, entry);
        }
        info!("Added drought layer {}", key);

        self.refresh_control();
    }

    /// Remove the drought layer for `year`/`month`. Unknown pairs are a no-op.
    pub fn remove_layer(&mut self, year: i32, month: &str, host: &mut impl OverlayHost) {
        let key = layer_key(year, month);
        let Some(pos) = self.overlays.iter().position(|(k, _)| *k == key) else {
            return;
        };

        host.detach(&key);
        self.overlays.remove(pos);
        info!("Removed drought layer {}", key);

        self.refresh_control();
    }

    /// Discard the layer control and rebuild it from the current state.
    pub fn refresh_control(&mut self) {
        self.generation += 1;
        self.control = Some(LayerControl {
            base_layers: self.base_layers.iter().map(|b| b.name.clone()).collect(),
            active_base: self.active_base,
            overlays: self
                .overlays
                .iter()
                .map(|(name, layer)| ControlEntry {
                    name: name.clone(),
                    visible: layer.visible,
                })
                .collect(),
            generation: self.generation,
        });
    }

    /// The "view" action: clear marked drought layers, then add the selected one.
    pub fn update_selection(&mut self, selection: &Selection, host: &mut impl OverlayHost) {
        let stale: Vec<String> = self
            .overlays
            .iter()
            .filter(|(key, layer)| {
                key.contains(DROUGHT_MARKER) || (self.replace_previous && layer.is_wms())
            })
            .map(|(key, _)| key.clone())
            .collect();

        for key in stale {
            if key.contains(DROUGHT_MARKER) {
                match parse_marked_key(&key) {
                    Ok((year, month)) => self.remove_layer(year, &month, host),
                    Err(e) => warn!("Skipping overlay with unreadable key: {}", e),
                }
            } else {
                self.remove_key(&key, host);
            }
        }

        if let Some((year, month)) = selection.complete() {
            let month = month.to_string();
            self.add_layer(year, &month, host);
        }

        let attached = self.wms_count();
        if attached > 1 {
            debug!("{} drought layers remain attached after view update", attached);
        }
    }

    /// Show or hide an overlay without removing it from the registry.
    pub fn set_visible(&mut self, key: &str, visible: bool, host: &mut impl OverlayHost) {
        let Some((_, layer)) = self.overlays.iter_mut().find(|(k, _)| k == key) else {
            return;
        };
        if layer.visible == visible {
            return;
        }

        layer.visible = visible;
        if visible {
            host.attach(key, layer);
        } else {
            host.detach(key);
        }

        self.refresh_control();
    }

    /// Switch the background imagery. Unknown names are ignored.
    pub fn select_base(&mut self, name: &str) {
        if let Some(index) = self.base_layers.iter().position(|b| b.name == name) {
            if index != self.active_base {
                info!("Switching base layer to {}", name);
                self.active_base = index;
                self.refresh_control();
            }
        }
    }

    fn remove_key(&mut self, key: &str, host: &mut impl OverlayHost) {
        if let Some(pos) = self.overlays.iter().position(|(k, _)| k == key) {
            host.detach(key);
            self.overlays.remove(pos);
            info!("Removed drought layer {}", key);
            self.refresh_control();
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OverlayLayer> {
        self.overlays.iter().find(|(k, _)| k == key).map(|(_, l)| l)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Registry keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.overlays.iter().map(|(k, _)| k.as_str())
    }

    pub fn overlays(&self) -> impl Iterator<Item = (&str, &OverlayLayer)> {
        self.overlays.iter().map(|(k, l)| (k.as_str(), l))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Number of WMS entries in the registry.
    #[must_use]
    pub fn wms_count(&self) -> usize {
        self.overlays.iter().filter(|(_, l)| l.is_wms()).count()
    }

    #[must_use]
    pub fn grid_visible(&self) -> bool {
        self.get(GRID_OVERLAY_NAME).is_some_and(|l| l.visible)
    }

    #[must_use]
    pub fn control(&self) -> Option<&LayerControl> {
        self.control.as_ref()
    }

    #[must_use]
    pub fn base_layers(&self) -> &[BaseLayer] {
        &self.base_layers
    }

    #[must_use]
    pub fn active_base(&self) -> &BaseLayer {
        &self.base_layers[self.active_base]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records attach/detach calls in order.
    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<String>,
        attached: Vec<String>,
    }

    impl OverlayHost for RecordingHost {
        fn attach(&mut self, key: &str, _layer: &OverlayLayer) {
            self.calls.push(format!("attach {key}"));
            self.attached.retain(|k| k != key);
            self.attached.push(key.to_string());
        }

        fn detach(&mut self, key: &str) {
            self.calls.push(format!("detach {key}"));
            self.attached.retain(|k| k != key);
        }
    }

    fn empty_registry() -> LayerRegistry {
        let mut registry = LayerRegistry::default();
        registry.overlays.clear();
        registry
    }

    #[test]
    fn test_add_layer_builds_wms_request() {
        let mut registry = LayerRegistry::default();
        let mut host = RecordingHost::default();

        registry.add_layer(2021, "03", &mut host);

        let layer = registry.get("2021_03").unwrap();
        match &layer.kind {
            OverlayKind::Wms(req) => {
                assert_eq!(req.layers, "drought:2021_03");
                assert_eq!(req.base_url, DEFAULT_WMS_URL);
            }
            OverlayKind::Grid => panic!("expected a WMS layer"),
        }
        assert_eq!(host.attached, vec!["2021_03"]);
    }

    #[test]
    fn test_add_layer_twice_overwrites() {
        let mut registry = empty_registry();
        let mut host = RecordingHost::default();

        registry.add_layer(2021, "03", &mut host);
        registry.add_layer(2021, "03", &mut host);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["2021_03"]);
        assert_eq!(host.attached, vec!["2021_03"]);
        assert_eq!(
            host.calls,
            vec!["attach 2021_03", "detach 2021_03", "attach 2021_03"]
        );
    }

    #[test]
    fn test_remove_missing_layer_is_noop() {
        let mut registry = empty_registry();
        let mut host = RecordingHost::default();

        registry.remove_layer(1999, "01", &mut host);

        assert!(registry.is_empty());
        assert!(host.calls.is_empty());
        assert!(registry.control().is_none());
    }

    #[test]
    fn test_remove_layer_detaches_and_refreshes() {
        let mut registry = LayerRegistry::default();
        let mut host = RecordingHost::default();

        registry.add_layer(2010, "12", &mut host);
        let before = registry.control().unwrap().generation;
        registry.remove_layer(2010, "12", &mut host);

        assert!(!registry.contains("2010_12"));
        assert!(host.attached.is_empty());
        let control = registry.control().unwrap();
        assert_eq!(control.generation, before + 1);
        assert!(control.overlays.iter().all(|e| e.name != "2010_12"));
    }

    #[test]
    fn test_control_tracks_registry() {
        let mut registry = LayerRegistry::default();
        let mut host = RecordingHost::default();

        registry.add_layer(2005, "01", &mut host);
        registry.add_layer(2005, "02", &mut host);

        let control = registry.control().unwrap();
        assert_eq!(control.base_layers, vec!["Google Satellite"]);
        let names: Vec<&str> = control.overlays.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![GRID_OVERLAY_NAME, "2005_01", "2005_02"]);
    }

    #[test]
    fn test_refresh_control_is_idempotent() {
        let mut registry = LayerRegistry::default();
        registry.refresh_control();
        let first = registry.control().cloned().unwrap();
        registry.refresh_control();
        let second = registry.control().cloned().unwrap();

        assert_eq!(first.overlays, second.overlays);
        assert_eq!(first.base_layers, second.base_layers);
        assert_eq!(second.generation, first.generation + 1);
    }

    #[test]
    fn test_view_keeps_previous_layers_by_default() {
        let mut registry = LayerRegistry::default();
        let mut host = RecordingHost::default();

        registry.update_selection(&Selection::new(2020, "01"), &mut host);
        registry.update_selection(&Selection::new(2020, "02"), &mut host);

        // Stored keys never carry the drought marker, so nothing is cleared
        assert!(registry.contains("2020_01"));
        assert!(registry.contains("2020_02"));
        assert_eq!(registry.wms_count(), 2);
        assert_eq!(host.attached, vec!["2020_01", "2020_02"]);
    }

    #[test]
    fn test_view_replaces_when_enabled() {
        let mut registry = LayerRegistry::new(RegistryConfig {
            replace_previous: true,
            ..Default::default()
        });
        let mut host = RecordingHost::default();

        registry.update_selection(&Selection::new(2020, "01"), &mut host);
        registry.update_selection(&Selection::new(2020, "02"), &mut host);

        assert!(!registry.contains("2020_01"));
        assert!(registry.contains("2020_02"));
        assert!(registry.grid_visible());
        assert_eq!(host.attached, vec!["2020_02"]);
    }

    #[test]
    fn test_view_removes_marked_keys() {
        let mut registry = empty_registry();
        let mut host = RecordingHost::default();
        registry.overlays.push((
            "2019_07".to_string(),
            OverlayLayer {
                kind: OverlayKind::Wms(WmsRequest::new(DEFAULT_WMS_URL, "drought:2019_07")),
                visible: true,
            },
        ));
        registry.overlays.push((
            "drought:2019_07".to_string(),
            OverlayLayer {
                kind: OverlayKind::Grid,
                visible: true,
            },
        ));

        registry.update_selection(&Selection::default(), &mut host);

        // The marked key decodes to 2019_07, which is what gets removed
        assert!(!registry.contains("2019_07"));
        assert!(registry.contains("drought:2019_07"));
    }

    #[test]
    fn test_view_without_complete_selection_adds_nothing() {
        let mut registry = empty_registry();
        let mut host = RecordingHost::default();

        let selection = Selection {
            year: Some(2001),
            month: None,
        };
        registry.update_selection(&selection, &mut host);

        assert!(registry.is_empty());
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_set_visible_toggles_host() {
        let mut registry = LayerRegistry::default();
        let mut host = RecordingHost::default();
        registry.add_layer(2021, "03", &mut host);

        registry.set_visible("2021_03", false, &mut host);
        assert!(host.attached.is_empty());
        assert!(registry.contains("2021_03"));
        assert!(!registry.control().unwrap().overlays[1].visible);

        registry.set_visible("2021_03", true, &mut host);
        assert_eq!(host.attached, vec!["2021_03"]);
    }

    #[test]
    fn test_select_base() {
        let mut osm = BaseLayer::google_satellite();
        osm.name = "OpenStreetMap".to_string();
        let mut registry = LayerRegistry::new(RegistryConfig {
            base_layers: vec![BaseLayer::google_satellite(), osm],
            ..Default::default()
        });

        registry.select_base("OpenStreetMap");
        assert_eq!(registry.active_base().name, "OpenStreetMap");
        assert_eq!(registry.control().unwrap().active_base, 1);

        registry.select_base("Nope");
        assert_eq!(registry.active_base().name, "OpenStreetMap");
    }

    #[test]
    fn test_attach_all_skips_hidden() {
        let mut registry = LayerRegistry::new(RegistryConfig {
            show_grid: false,
            ..Default::default()
        });
        let mut host = RecordingHost::default();
        registry.attach_all(&mut host);
        assert!(host.calls.is_empty());
        assert!(registry.control().is_some());
    }

    #[test]
    fn test_parse_marked_key() {
        assert_eq!(parse_marked_key("drought:2021_03"), Ok((2021, "03".to_string())));
        assert!(matches!(
            parse_marked_key("2021_03"),
            Err(LayerKeyError::MissingMarker(_))
        ));
        assert!(matches!(
            parse_marked_key("drought:2021"),
            Err(LayerKeyError::Malformed(_))
        ));
        assert!(matches!(
            parse_marked_key("drought:abcd_03"),
            Err(LayerKeyError::InvalidYear(_))
        ));
    }
}
