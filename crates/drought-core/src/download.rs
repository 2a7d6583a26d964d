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

//! Yearly dataset archives offered for download.

use std::fmt;

/// The two archives published per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatasetKind {
    #[default]
    ZonalStatistics,
    RasterMaps,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::ZonalStatistics, DatasetKind::RasterMaps];

    /// Archive file name on the server.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        match self {
            DatasetKind::ZonalStatistics => "zonal_statistics.zip",
            DatasetKind::RasterMaps => "raster_maps.zip",
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            DatasetKind::ZonalStatistics => "Zonal statistics",
            DatasetKind::RasterMaps => "Raster maps",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One archive download. Nothing checks that the file exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub year: i32,
    pub kind: DatasetKind,
}

impl DownloadRequest {
    #[must_use]
    pub fn new(year: i32, kind: DatasetKind) -> Self {
        Self { year, kind }
    }

    /// Path relative to the data host, e.g. `data/2015/zonal_statistics.zip`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("data/{}/{}", self.year, self.kind.file_name())
    }

    #[must_use]
    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    /// Absolute URL under `base_url`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if base.is_empty() {
            self.path()
        } else {
            format!("{base}/{}", self.path())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zonal_path() {
        let req = DownloadRequest::new(2015, DatasetKind::ZonalStatistics);
        assert_eq!(req.path(), "data/2015/zonal_statistics.zip");
        assert_eq!(req.file_name(), "zonal_statistics.zip");
    }

    #[test]
    fn test_raster_path() {
        let req = DownloadRequest::new(2003, DatasetKind::RasterMaps);
        assert_eq!(req.path(), "data/2003/raster_maps.zip");
    }

    #[test]
    fn test_url_joins_base() {
        let req = DownloadRequest::new(2020, DatasetKind::RasterMaps);
        assert_eq!(
            req.url("http://localhost:8000/"),
            "http://localhost:8000/data/2020/raster_maps.zip"
        );
        assert_eq!(req.url(""), "data/2020/raster_maps.zip");
    }
}
