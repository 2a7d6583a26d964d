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

//! Explicit application state and its event dispatcher.
//!
//! Every user interaction is turned into a [`UiEvent`] and fed to
//! [`Session::dispatch`], which applies the corresponding state change.
//! Anything the session cannot do by itself (opening a URL) comes back as
//! an [`Effect`] for the caller to perform.

use std::time::Duration;

use log::{debug, info};

use crate::attributes::{AttributePopup, AttributeSource, ClickCoordinates};
use crate::catalog::{DateRange, DistrictCatalog};
use crate::download::{DatasetKind, DownloadRequest};
use crate::geo::{LatLng, Viewport};
use crate::grid::{GridGenerator, GridState};
use crate::layout::PanelLayout;
use crate::registry::{LayerRegistry, OverlayHost, RegistryConfig, Selection};
use crate::slideshow::SlideshowViewer;

/// Everything that can happen to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The map was laid out for the first time.
    Startup(Viewport),
    /// Panning or zooming came to rest.
    ViewportSettled(Viewport),
    YearSelected(Option<i32>),
    MonthSelected(Option<String>),
    /// The "view" button.
    ViewRequested,
    OverlayToggled { key: String, visible: bool },
    BaseLayerSelected(String),
    MapClicked(LatLng),
    PopupClosed,
    ImageClicked(usize),
    /// Wall time since the previous frame.
    TimeElapsed(Duration),
    PanelToggled,
    WindowResized(f32),
    DownloadRequested { year: i32, kind: DatasetKind },
}

/// Side effects the caller has to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand a URL to the system browser.
    OpenUrl(String),
}

/// Construction parameters for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub grid: GridGenerator,
    pub registry: RegistryConfig,
    pub dates: DateRange,
    pub districts: DistrictCatalog,
    pub slide_period: Duration,
    pub panel_breakpoint: f32,
    pub data_base_url: String,
}

/// The whole mutable state of one application run.
pub struct Session {
    grid: GridState,
    registry: LayerRegistry,
    selection: Selection,
    dates: DateRange,
    districts: DistrictCatalog,
    slideshow: SlideshowViewer,
    layout: PanelLayout,
    popup: Option<AttributePopup>,
    attributes: Box<dyn AttributeSource>,
    data_base_url: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("selection", &self.selection)
            .field("registry", &self.registry)
            .field("slideshow", &self.slideshow)
            .finish_non_exhaustive()
    }
}

impl Session {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let slideshow = SlideshowViewer::new(config.districts.len(), config.slide_period);
        Self {
            grid: GridState::new(config.grid),
            registry: LayerRegistry::new(config.registry),
            selection: Selection::default(),
            dates: config.dates,
            districts: config.districts,
            slideshow,
            layout: PanelLayout::new(config.panel_breakpoint),
            popup: None,
            attributes: Box::new(ClickCoordinates),
            data_base_url: config.data_base_url,
        }
    }

    /// Replace the attribute lookup used for map click popups.
    #[must_use]
    pub fn with_attribute_source(mut self, source: Box<dyn AttributeSource>) -> Self {
        self.attributes = source;
        self
    }

    /// Apply one event.
    pub fn dispatch(&mut self, event: UiEvent, host: &mut impl OverlayHost) -> Option<Effect> {
        match event {
            UiEvent::Startup(viewport) => {
                info!("Session starting");
                self.registry.attach_all(host);
                self.grid.redraw(viewport);
            }
            UiEvent::ViewportSettled(viewport) => {
                self.grid.redraw(viewport);
            }
            UiEvent::YearSelected(year) => {
                self.selection.year = year;
            }
            UiEvent::MonthSelected(month) => {
                self.selection.month = month;
            }
            UiEvent::ViewRequested => {
                debug!("View requested for {:?}", self.selection);
                let selection = self.selection.clone();
                self.registry.update_selection(&selection, host);
            }
            UiEvent::OverlayToggled { key, visible } => {
                self.registry.set_visible(&key, visible, host);
            }
            UiEvent::BaseLayerSelected(name) => {
                self.registry.select_base(&name);
            }
            UiEvent::MapClicked(position) => {
                self.popup = Some(AttributePopup::build(position, self.attributes.as_ref()));
            }
            UiEvent::PopupClosed => {
                self.popup = None;
            }
            UiEvent::ImageClicked(index) => {
                self.slideshow.click(index);
            }
            UiEvent::TimeElapsed(dt) => {
                self.slideshow.advance(dt);
            }
            UiEvent::PanelToggled => {
                self.layout.toggle();
            }
            UiEvent::WindowResized(width) => {
                self.layout.on_resize(width);
            }
            UiEvent::DownloadRequested { year, kind } => {
                let request = DownloadRequest::new(year, kind);
                let url = request.url(&self.data_base_url);
                info!("Downloading {} for {}: {}", kind, year, url);
                return Some(Effect::OpenUrl(url));
            }
        }
        None
    }

    #[must_use]
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    #[must_use]
    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn dates(&self) -> &DateRange {
        &self.dates
    }

    #[must_use]
    pub fn districts(&self) -> &DistrictCatalog {
        &self.districts
    }

    #[must_use]
    pub fn slideshow(&self) -> &SlideshowViewer {
        &self.slideshow
    }

    #[must_use]
    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    #[must_use]
    pub fn popup(&self) -> Option<&AttributePopup> {
        self.popup.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OverlayLayer;
    use crate::slideshow::GalleryMode;

    #[derive(Default)]
    struct CountingHost {
        attached: Vec<String>,
    }

    impl OverlayHost for CountingHost {
        fn attach(&mut self, key: &str, _layer: &OverlayLayer) {
            self.attached.retain(|k| k != key);
            self.attached.push(key.to_string());
        }

        fn detach(&mut self, key: &str) {
            self.attached.retain(|k| k != key);
        }
    }

    fn session() -> Session {
        Session::new(SessionConfig {
            grid: GridGenerator::default(),
            registry: RegistryConfig::default(),
            dates: DateRange::new(2000, 2024).unwrap(),
            districts: DistrictCatalog::default(),
            slide_period: Duration::from_secs(5),
            panel_breakpoint: 1024.0,
            data_base_url: "http://localhost:8000".to_string(),
        })
    }

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(-20.4, 28.2), LatLng::new(-18.6, 30.8))
    }

    #[test]
    fn test_startup_draws_grid_and_attaches_grid_overlay() {
        let mut s = session();
        let mut host = CountingHost::default();
        s.dispatch(UiEvent::Startup(viewport()), &mut host);

        assert_eq!(s.grid().redraws(), 1);
        assert_eq!(s.grid().overlay().labels.len(), 4);
        assert_eq!(host.attached, vec!["Grid Overlay"]);
        assert!(s.registry().control().is_some());
    }

    #[test]
    fn test_every_settle_redraws() {
        let mut s = session();
        let mut host = CountingHost::default();
        s.dispatch(UiEvent::Startup(viewport()), &mut host);
        s.dispatch(UiEvent::ViewportSettled(viewport()), &mut host);
        s.dispatch(UiEvent::ViewportSettled(viewport()), &mut host);
        assert_eq!(s.grid().redraws(), 3);
    }

    #[test]
    fn test_view_with_selection_adds_layer() {
        let mut s = session();
        let mut host = CountingHost::default();

        s.dispatch(UiEvent::YearSelected(Some(2021)), &mut host);
        s.dispatch(UiEvent::ViewRequested, &mut host);
        assert_eq!(s.registry().wms_count(), 0);

        s.dispatch(UiEvent::MonthSelected(Some("03".to_string())), &mut host);
        s.dispatch(UiEvent::ViewRequested, &mut host);
        assert!(s.registry().contains("2021_03"));
        assert_eq!(host.attached, vec!["2021_03"]);
    }

    #[test]
    fn test_map_click_opens_popup() {
        let mut s = session();
        let mut host = CountingHost::default();
        s.dispatch(UiEvent::MapClicked(LatLng::new(-19.5, 29.5)), &mut host);

        let popup = s.popup().unwrap();
        assert_eq!(popup.anchor, LatLng::new(-19.5, 29.5));
        assert_eq!(popup.headers.len(), popup.values.len());

        s.dispatch(UiEvent::PopupClosed, &mut host);
        assert!(s.popup().is_none());
    }

    #[test]
    fn test_slideshow_events() {
        let mut s = session();
        let mut host = CountingHost::default();

        s.dispatch(UiEvent::ImageClicked(5), &mut host);
        for _ in 0..3 {
            s.dispatch(UiEvent::TimeElapsed(Duration::from_secs(5)), &mut host);
        }
        assert_eq!(s.slideshow().cursor(), Some(8));

        s.dispatch(UiEvent::ImageClicked(8), &mut host);
        assert_eq!(s.slideshow().mode(), GalleryMode::Grid);
        assert_eq!(s.slideshow().visible().len(), 60);
    }

    #[test]
    fn test_download_returns_url() {
        let mut s = session();
        let mut host = CountingHost::default();
        let effect = s.dispatch(
            UiEvent::DownloadRequested {
                year: 2015,
                kind: DatasetKind::ZonalStatistics,
            },
            &mut host,
        );
        assert_eq!(
            effect,
            Some(Effect::OpenUrl(
                "http://localhost:8000/data/2015/zonal_statistics.zip".to_string()
            ))
        );
    }

    #[test]
    fn test_panel_events() {
        let mut s = session();
        let mut host = CountingHost::default();
        s.dispatch(UiEvent::WindowResized(800.0), &mut host);
        s.dispatch(UiEvent::PanelToggled, &mut host);
        assert!(!s.layout().panel_visible());
        s.dispatch(UiEvent::WindowResized(1400.0), &mut host);
        assert!(s.layout().panel_visible());
    }

    #[test]
    fn test_overlay_toggle_hides_grid() {
        let mut s = session();
        let mut host = CountingHost::default();
        s.dispatch(UiEvent::Startup(viewport()), &mut host);
        s.dispatch(
            UiEvent::OverlayToggled {
                key: "Grid Overlay".to_string(),
                visible: false,
            },
            &mut host,
        );
        assert!(!s.registry().grid_visible());
        assert!(host.attached.is_empty());
    }
}
