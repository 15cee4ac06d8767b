//! The static list of training modules and course-level settings.

use crate::error::{CatalogError, Result};
use crate::render::{HtmlConfig, MathBackend, MathOptions};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// A training module. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Module {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Raw markdown+LaTeX body
    #[serde(default)]
    pub content: String,
}

/// Ordered modules plus the render settings they share.
#[derive(Debug, Clone)]
pub struct Catalog {
    modules: Vec<Module>,
    config: HtmlConfig,
}

impl Catalog {
    /// Build a catalog from modules, rejecting empty or duplicate ids.
    pub fn from_modules(modules: Vec<Module>) -> std::result::Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (position, module) in modules.iter().enumerate() {
            if module.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if !seen.insert(module.id.as_str()) {
                return Err(CatalogError::DuplicateId(module.id.clone()));
            }
        }

        Ok(Self {
            modules,
            config: HtmlConfig::default(),
        })
    }

    /// Replace the render settings.
    pub fn with_config(mut self, config: HtmlConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse a TOML course file.
    pub fn from_toml_str(input: &str) -> std::result::Result<Self, CatalogError> {
        let raw: RawCourseFile =
            toml::from_str(input).map_err(|e| CatalogError::Toml(e.to_string()))?;
        let config = convert_settings(raw.math, raw.html)?;
        let catalog = Self::from_modules(raw.modules)?.with_config(config);
        log::debug!("loaded course with {} modules", catalog.len());
        Ok(catalog)
    }

    /// Read and parse a TOML course file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let input = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from_toml_str(&input)?)
    }

    pub fn get(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.id == id)
    }

    /// Modules before and after `id` in catalog order.
    pub fn neighbors(&self, id: &str) -> (Option<&Module>, Option<&Module>) {
        match self.position(id) {
            Some(i) => (
                i.checked_sub(1).and_then(|prev| self.modules.get(prev)),
                self.modules.get(i + 1),
            ),
            None => (None, None),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn config(&self) -> &HtmlConfig {
        &self.config
    }
}

/// Raw course file structure for deserialization.
#[derive(Debug, Deserialize)]
struct RawCourseFile {
    #[serde(default)]
    math: RawMath,
    #[serde(default)]
    html: RawHtml,
    #[serde(default)]
    modules: Vec<Module>,
}

#[derive(Debug, Deserialize, Default)]
struct RawMath {
    backend: Option<String>,
    #[serde(default)]
    macros: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Default)]
struct RawHtml {
    class_prefix: Option<String>,
    title: Option<String>,
    custom_css: Option<String>,
    include_toc: Option<bool>,
    standalone: Option<bool>,
}

fn convert_settings(
    math: RawMath,
    html: RawHtml,
) -> std::result::Result<HtmlConfig, CatalogError> {
    let defaults = HtmlConfig::default();

    let math_backend = match math.backend {
        Some(name) => {
            MathBackend::from_name(&name).ok_or(CatalogError::UnknownBackend(name))?
        }
        None => defaults.math_backend,
    };

    Ok(HtmlConfig {
        math_backend,
        math: MathOptions::with_macros(math.macros),
        standalone: html.standalone.unwrap_or(defaults.standalone),
        title: html.title,
        custom_css: html.custom_css,
        include_toc: html.include_toc.unwrap_or(defaults.include_toc),
        class_prefix: html.class_prefix.unwrap_or(defaults.class_prefix),
    })
}
