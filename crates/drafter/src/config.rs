//! Configuration types for diagram imports.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! configuration file; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the import and canvas sections.
//! - [`ImportConfig`] - Controls stencil lookup, page fitting and stencil release.
//! - [`Catalog`] - Templates and stencils the in-memory canvas can load.
//!
//! # Example
//!
//! ```
//! # use drafter::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.import().stencil_extensions(), [".vss"]);
//! assert!(config.import().resize_page());
//! ```

use serde::Deserialize;

use drafter_core::canvas::OpenMode;

pub use drafter_core::canvas::Catalog;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Import engine section.
    #[serde(default)]
    import: ImportConfig,

    /// Canvas catalog section, used by hosts backed by [`drafter_core::canvas::MemoryCanvas`].
    #[serde(default)]
    canvas: Catalog,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(import: ImportConfig, canvas: Catalog) -> Self {
        Self { import, canvas }
    }

    /// Returns the import configuration.
    pub fn import(&self) -> &ImportConfig {
        &self.import
    }

    /// Returns the canvas catalog.
    pub fn canvas(&self) -> &Catalog {
        &self.canvas
    }
}

/// Settings of the construction engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Extensions appended to a stencil name when opening it by name fails.
    stencil_extensions: Vec<String>,

    /// How stencils are opened.
    stencil_open_mode: OpenMode,

    /// Fit the page to its contents after all items are built.
    resize_page: bool,

    /// Close stencils that were opened during the import once it finishes.
    release_stencils: bool,
}

impl ImportConfig {
    pub fn with_stencil_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stencil_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stencil_open_mode(mut self, mode: OpenMode) -> Self {
        self.stencil_open_mode = mode;
        self
    }

    pub fn with_resize_page(mut self, resize_page: bool) -> Self {
        self.resize_page = resize_page;
        self
    }

    pub fn with_release_stencils(mut self, release_stencils: bool) -> Self {
        self.release_stencils = release_stencils;
        self
    }

    pub fn stencil_extensions(&self) -> &[String] {
        &self.stencil_extensions
    }

    pub fn stencil_open_mode(&self) -> OpenMode {
        self.stencil_open_mode
    }

    pub fn resize_page(&self) -> bool {
        self.resize_page
    }

    pub fn release_stencils(&self) -> bool {
        self.release_stencils
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            stencil_extensions: vec![".vss".to_string()],
            stencil_open_mode: OpenMode::Docked,
            resize_page: true,
            release_stencils: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_import_section_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "import": { "stencil_open_mode": "read_only", "resize_page": false } }"#,
        )
        .unwrap();

        assert_eq!(config.import().stencil_open_mode(), OpenMode::ReadOnly);
        assert!(!config.import().resize_page());
        assert!(config.import().release_stencils());
        assert_eq!(config.import().stencil_extensions(), [".vss"]);
        assert_eq!(config.canvas(), &Catalog::default());
    }

    #[test]
    fn test_canvas_catalog_section() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "canvas": {
                    "templates": ["Network.vst"],
                    "stencils": { "Network.vss": ["Router", "Switch"] }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.canvas().templates(), ["Network.vst"]);
        assert_eq!(
            config.canvas().stencils()["Network.vss"],
            ["Router", "Switch"]
        );
    }
}
