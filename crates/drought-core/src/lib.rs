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

//! UI-independent state for the drought monitor map.
//!
//! This library holds everything the desktop viewer does that is not drawing:
//!
//! - **Grid layer**: latitude/longitude lines and corner labels for a viewport
//! - **Registry layer**: overlay layers keyed by `year_month` and the layer
//!   control snapshot derived from them
//! - **Gallery layer**: the district thumbnail slideshow state machine
//! - **Session**: one object owning all of the above, driven by [`UiEvent`]s
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use drought_core::{
//!     DateRange, DistrictCatalog, GridGenerator, LatLng, OverlayHost, OverlayLayer,
//!     RegistryConfig, Session, SessionConfig, UiEvent, Viewport,
//! };
//!
//! struct NoMap;
//! impl OverlayHost for NoMap {
//!     fn attach(&mut self, _key: &str, _layer: &OverlayLayer) {}
//!     fn detach(&mut self, _key: &str) {}
//! }
//!
//! let mut session = Session::new(SessionConfig {
//!     grid: GridGenerator::default(),
//!     registry: RegistryConfig::default(),
//!     dates: DateRange::new(2000, 2024).unwrap(),
//!     districts: DistrictCatalog::default(),
//!     slide_period: Duration::from_secs(5),
//!     panel_breakpoint: 1024.0,
//!     data_base_url: String::new(),
//! });
//!
//! let viewport = Viewport::new(LatLng::new(-20.4, 28.2), LatLng::new(-18.6, 30.8));
//! session.dispatch(UiEvent::Startup(viewport), &mut NoMap);
//! session.dispatch(UiEvent::YearSelected(Some(2021)), &mut NoMap);
//! session.dispatch(UiEvent::MonthSelected(Some("03".into())), &mut NoMap);
//! session.dispatch(UiEvent::ViewRequested, &mut NoMap);
//!
//! assert!(session.registry().contains("2021_03"));
//! ```

pub mod attributes;
pub mod catalog;
pub mod download;
pub mod geo;
pub mod grid;
pub mod layout;
pub mod mercator;
pub mod registry;
pub mod scale;
pub mod session;
pub mod slideshow;
pub mod wms;

pub use attributes::{AttributePopup, AttributeRecord, AttributeSource, ClickCoordinates, StaticAttributes};
pub use catalog::{CatalogError, DateRange, DistrictCatalog, DistrictImage};
pub use download::{DatasetKind, DownloadRequest};
pub use geo::{LatLng, Viewport};
pub use grid::{
    Axis, CornerLabel, GridError, GridGenerator, GridLine, GridOverlay, GridState, SettleDetector,
};
pub use layout::PanelLayout;
pub use mercator::WebMercator;
pub use registry::{
    BaseLayer, ControlEntry, LayerControl, LayerKeyError, LayerRegistry, OverlayHost, OverlayKind,
    OverlayLayer, RegistryConfig, Selection,
};
pub use scale::ScaleBar;
pub use session::{Effect, Session, SessionConfig, UiEvent};
pub use slideshow::{GalleryMode, SlideshowViewer};
pub use wms::{WmsRequest, XyzTemplate};
