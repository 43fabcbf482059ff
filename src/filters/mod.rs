//! Filter definitions, the registry that orders them, and the loaders that
//! read them from markup or data sources.

pub mod data;
pub mod definition;
pub mod loader;
pub mod markup;
pub mod registry;

pub use data::DataLoader;
pub use definition::{FilterDefinition, FilterPattern, FilterSpec};
pub use loader::{FilterLoader, SourceFormat};
pub use markup::MarkupLoader;
pub use registry::FilterRegistry;

use crate::errors::Result;
use crate::shared::WalkOptions;
use std::path::{Path, PathBuf};

/// Ordered list of filter sources to load
#[derive(Debug, Clone, Default)]
pub struct FilterSources {
    pub markup: Vec<PathBuf>,
    pub data: Vec<PathBuf>,
}

impl FilterSources {
    pub fn is_empty(&self) -> bool {
        self.markup.is_empty() && self.data.is_empty()
    }

    /// Every source with its format, markup sources first
    pub fn iter(&self) -> impl Iterator<Item = (SourceFormat, &Path)> {
        let markup = self.markup.iter().map(|p| (SourceFormat::Markup, p.as_path()));
        let data = self.data.iter().map(|p| (SourceFormat::Data, p.as_path()));
        markup.chain(data)
    }

    /// Build the registry for a run; any failure aborts the whole load
    pub fn load(&self, options: WalkOptions) -> Result<FilterRegistry> {
        let mut registry = FilterRegistry::new();

        for (format, source) in self.iter() {
            let added = match format {
                SourceFormat::Markup => MarkupLoader.load(source, &mut registry, options)?,
                SourceFormat::Data => DataLoader.load(source, &mut registry, options)?,
            };
            tracing::info!("Loaded {} filters from {} source {}", added, format, source.display());
        }

        if registry.is_empty() {
            tracing::warn!("No filters were loaded; no document will match");
        }
        for name in registry.shared_names() {
            tracing::warn!("Filter name '{}' is used by more than one filter", name);
        }

        Ok(registry)
    }
}
