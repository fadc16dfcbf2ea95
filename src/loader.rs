// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loading device tables from a code directory.
//!
//! Tables are JSON files named after their device code, grouped by device
//! class:
//!
//! ```text
//! <root>/custom_codes/fan/1020.json   user-provided, searched first
//! <root>/codes/fan/1020.json          bundled
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, LoadError};
use crate::table::{CommandTable, DeviceClass, DeviceData};

/// Directory for user-provided tables.
pub const CUSTOM_CODES_DIR: &str = "custom_codes";

/// Directory for bundled tables.
pub const CODES_DIR: &str = "codes";

/// Reads device tables from a code directory.
#[derive(Debug, Clone)]
pub struct TableLoader {
    root: PathBuf,
}

impl TableLoader {
    /// Creates a loader rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the candidate files for a device, in search order.
    #[must_use]
    pub fn candidates(&self, class: DeviceClass, device_code: u32) -> [PathBuf; 2] {
        let file = format!("{device_code}.json");
        [CUSTOM_CODES_DIR, CODES_DIR].map(|dir| self.root.join(dir).join(class.as_str()).join(&file))
    }

    /// Reads the raw device data for a device code.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if no candidate file exists, and
    /// [`LoadError::Io`] or [`LoadError::Json`] if the first existing file
    /// cannot be read or parsed.
    pub async fn load_data(
        &self,
        class: DeviceClass,
        device_code: u32,
    ) -> Result<DeviceData, LoadError> {
        let candidates = self.candidates(class, device_code);
        for path in &candidates {
            let contents = match tokio::fs::read_to_string(path).await {
                Ok(contents) => contents,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(LoadError::Io {
                        path: path.clone(),
                        source,
                    });
                }
            };

            debug!(path = %path.display(), "Loading device table");
            return serde_json::from_str(&contents).map_err(|source| LoadError::Json {
                path: path.clone(),
                source,
            });
        }

        Err(LoadError::NotFound {
            code: device_code,
            searched: candidates
                .into_iter()
                .filter_map(|path| path.parent().map(Path::to_path_buf))
                .collect(),
        })
    }

    /// Loads and validates the table for a device code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if the file cannot be loaded and
    /// [`Error::Table`] if its content is structurally invalid.
    pub async fn load(&self, class: DeviceClass, device_code: u32) -> Result<CommandTable, Error> {
        let data = self.load_data(class, device_code).await?;
        Ok(CommandTable::from_device_data(class, data)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const LIGHT: &str = r#"{"manufacturer": "Bundled", "commands": {"on": "1", "off": "0"}}"#;
    const CUSTOM_LIGHT: &str = r#"{"manufacturer": "Custom", "commands": {"on": "1", "off": "0"}}"#;

    fn write(root: &Path, dir: &str, class: &str, code: u32, contents: &str) {
        let dir = root.join(dir).join(class);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{code}.json")), contents).unwrap();
    }

    #[tokio::test]
    async fn loads_bundled_table() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), CODES_DIR, "light", 1000, LIGHT);

        let table = TableLoader::new(root.path())
            .load(DeviceClass::Light, 1000)
            .await
            .unwrap();
        assert_eq!(table.manufacturer(), "Bundled");
    }

    #[tokio::test]
    async fn custom_table_takes_precedence() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), CODES_DIR, "light", 1000, LIGHT);
        write(root.path(), CUSTOM_CODES_DIR, "light", 1000, CUSTOM_LIGHT);

        let data = TableLoader::new(root.path())
            .load_data(DeviceClass::Light, 1000)
            .await
            .unwrap();
        assert_eq!(data.manufacturer, "Custom");
    }

    #[tokio::test]
    async fn missing_table_lists_searched_directories() {
        let root = tempfile::tempdir().unwrap();
        let err = TableLoader::new(root.path())
            .load_data(DeviceClass::Fan, 1020)
            .await
            .unwrap_err();
        match err {
            LoadError::NotFound { code, searched } => {
                assert_eq!(code, 1020);
                assert_eq!(searched[0], root.path().join("custom_codes").join("fan"));
                assert_eq!(searched[1], root.path().join("codes").join("fan"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_a_load_error() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), CODES_DIR, "light", 7, "{ not json");

        let err = TableLoader::new(root.path())
            .load(DeviceClass::Light, 7)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Load(LoadError::Json { .. })));
    }

    #[tokio::test]
    async fn invalid_table_is_a_table_error() {
        let root = tempfile::tempdir().unwrap();
        write(
            root.path(),
            CODES_DIR,
            "fan",
            1,
            r#"{"manufacturer": "Acme", "commands": {"off": "0"}}"#,
        );

        let err = TableLoader::new(root.path())
            .load(DeviceClass::Fan, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Table(_)));
    }
}
