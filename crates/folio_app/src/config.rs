//! Site configuration (`folio.toml`)
//!
//! Every section is optional; an empty document reproduces the stock site.
//!
//! ```toml
//! [theme]
//! default_scheme = "dark"
//!
//! [accent]
//! default_color = "neon-green"
//!
//! [[carousels]]
//! name = "projects"
//! card_class = "project-card"
//! layout = { fixed_count = 3 }
//!
//! [[timeline.entries]]
//! id = "entry-2025-01"
//! period = "2025-01"
//! period_label = "January 2025"
//! title = "Launched the site"
//! ```

use std::fs;
use std::path::Path;

use folio_theme::{AccentConfig, ThemeConfig};
use folio_widgets::{CarouselConfig, MenuConfig, TabsConfig, TimelineConfig};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration of every page controller
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub theme: ThemeConfig,
    pub accent: AccentConfig,
    /// One entry per carousel instance on the page
    pub carousels: Vec<CarouselConfig>,
    pub timeline: TimelineConfig,
    pub tabs: TabsConfig,
    pub menu: MenuConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            accent: AccentConfig::default(),
            carousels: vec![CarouselConfig::projects(), CarouselConfig::skills()],
            timeline: TimelineConfig::default(),
            tabs: TabsConfig::default(),
            menu: MenuConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            "config: loaded {} ({} carousels, {} timeline entries)",
            path.display(),
            config.carousels.len(),
            config.timeline.entries.len()
        );
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn carousel(&self, name: &str) -> Option<&CarouselConfig> {
        self.carousels.iter().find(|c| c.name == name)
    }
}
