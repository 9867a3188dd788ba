use std::path::{Path, PathBuf};
use anyhow::{Result, Context, bail};
use clap::ValueEnum;
use log::{debug, info};
use serde::Deserialize;

use crate::course::types::{
    CourseScanOptions, EntryOrder, ImageSelection, ListingFailurePolicy, MetadataSelection,
};
use crate::utils::file_utils;

/// Built-in option sets matching the two revisions of the indexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// courses.json, first image found, abort on unreadable folder
    Legacy,
    
    /// index.json, png > jpg > jpeg > webp > gif, skip unreadable folders
    #[default]
    Current,
}

impl Preset {
    pub fn options(self) -> CourseScanOptions {
        match self {
            Preset::Legacy => CourseScanOptions::legacy(),
            Preset::Current => CourseScanOptions::current(),
        }
    }
}

/// Optional overrides read from a config file.
///
/// Every key is optional; missing keys keep the preset's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexerConfig {
    pub preset: Option<Preset>,
    pub output_file: Option<PathBuf>,
    pub exclude_dirs: Option<Vec<String>>,
    pub image_extensions: Option<Vec<String>>,
    pub image_selection: Option<ImageSelection>,
    pub metadata_selection: Option<MetadataSelection>,
    pub listing_failure: Option<ListingFailurePolicy>,
    pub order: Option<EntryOrder>,
}

impl IndexerConfig {
    /// Load a config file, picking the format from its extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        
        let content = file_utils::read_file_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        
        let config: IndexerConfig = match ext.as_str() {
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config {}", path.display()))?,
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config {}", path.display()))?,
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config {}", path.display()))?,
            other => bail!(
                "Unsupported config format {:?} for {} (expected toml, yaml or json)",
                other,
                path.display()
            ),
        };
        
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
    
    /// Resolve the final options: explicit preset, else the file's, else `current`
    pub fn into_options(self, preset: Option<Preset>) -> CourseScanOptions {
        let mut options = preset.or(self.preset).unwrap_or_default().options();
        
        if let Some(output_file) = self.output_file {
            options.output_file = output_file;
        }
        if let Some(exclude_dirs) = self.exclude_dirs {
            options.exclude_dirs = exclude_dirs;
        }
        if let Some(image_extensions) = self.image_extensions {
            options.image_extensions = image_extensions
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect();
        }
        if let Some(image_selection) = self.image_selection {
            options.image_selection = image_selection;
        }
        if let Some(metadata_selection) = self.metadata_selection {
            options.metadata_selection = metadata_selection;
        }
        if let Some(listing_failure) = self.listing_failure {
            options.listing_failure = listing_failure;
        }
        if let Some(order) = self.order {
            options.order = order;
        }
        
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn empty_config_is_current_preset() {
        assert_eq!(IndexerConfig::default().into_options(None), CourseScanOptions::current());
    }

    #[test]
    fn explicit_preset_beats_file_preset() {
        let config = IndexerConfig {
            preset: Some(Preset::Current),
            ..Default::default()
        };
        assert_eq!(config.into_options(Some(Preset::Legacy)), CourseScanOptions::legacy());
    }

    #[test]
    fn loads_toml_overrides() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("indexer.toml");
        fs::write(&path, r#"
preset = "legacy"
output_file = "catalog.json"
image_extensions = [".PNG", "avif"]
image_selection = "priority"
order = "name"
"#)?;

        let options = IndexerConfig::load(&path)?.into_options(None);
        assert_eq!(options.output_file, PathBuf::from("catalog.json"));
        assert_eq!(options.image_extensions, vec!["png".to_string(), "avif".to_string()]);
        assert_eq!(options.image_selection, ImageSelection::Priority);
        assert_eq!(options.order, EntryOrder::Name);
        assert_eq!(options.exclude_dirs, CourseScanOptions::legacy().exclude_dirs);
        assert_eq!(options.listing_failure, ListingFailurePolicy::Abort);
        Ok(())
    }

    #[test]
    fn loads_yaml_and_json() -> Result<()> {
        let dir = tempdir()?;
        let yaml = dir.path().join("indexer.yml");
        fs::write(&yaml, "exclude_dirs: [drafts]\nlisting_failure: abort\n")?;
        let options = IndexerConfig::load(&yaml)?.into_options(None);
        assert_eq!(options.exclude_dirs, vec!["drafts".to_string()]);
        assert_eq!(options.listing_failure, ListingFailurePolicy::Abort);

        let json = dir.path().join("indexer.json");
        fs::write(&json, r#"{"metadata_selection": "first_json"}"#)?;
        let options = IndexerConfig::load(&json)?.into_options(None);
        assert_eq!(options.metadata_selection, MetadataSelection::FirstJson);
        Ok(())
    }

    #[test]
    fn rejects_unknown_keys_and_formats() -> Result<()> {
        let dir = tempdir()?;
        let typo = dir.path().join("indexer.toml");
        fs::write(&typo, "output = \"x.json\"\n")?;
        assert!(IndexerConfig::load(&typo).is_err());

        let ini = dir.path().join("indexer.ini");
        fs::write(&ini, "")?;
        assert!(IndexerConfig::load(&ini).is_err());
        Ok(())
    }
}
