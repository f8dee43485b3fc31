use crate::channels::ChannelResolver;
use crate::competition::{CompetitionFilter, DEFAULT_EXCLUDED_COMPETITIONS};
use crate::errors::CatalogError;
use crate::logos::{LeagueTable, LogoFile, LogoIndex, LogoResolver};
use crate::normalize::AliasTable;
use crate::parser::{PlaylistFormat, DEFAULT_LOGO_URL, DEFAULT_STREAM_SCHEME};
use crate::pipeline::Lookups;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PLAYLIST_SOURCE: &str =
    "https://raw.githubusercontent.com/Icastresana/lista1/main/eventos.m3u";
pub const DEFAULT_LOGOS_BASE_URL: &str =
    "https://raw.githubusercontent.com/amouradore/tvsport/main/logos";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "tvsport", "match-catalog")
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// URL or local path of the event playlist
    pub playlist_source: String,
    /// Directory laid out as `<league>/<team>.png`
    pub logos_dir: PathBuf,
    pub logos_base_url: String,
    /// JSON object of stream id -> channel name
    pub channel_map_path: PathBuf,
    pub output_dir: PathBuf,
    pub primary_file: String,
    pub secondary_file: String,
    pub default_logo: String,
    pub stream_scheme: String,
    pub excluded_competitions: Vec<String>,
    /// Merged over the built-in alias table
    pub extra_aliases: BTreeMap<String, String>,
    /// Competition fragment -> league folder, consulted before the built-ins
    pub league_folders: BTreeMap<String, String>,
    pub request_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            playlist_source: DEFAULT_PLAYLIST_SOURCE.to_string(),
            logos_dir: PathBuf::from("logos"),
            logos_base_url: DEFAULT_LOGOS_BASE_URL.to_string(),
            channel_map_path: PathBuf::from("channel_mapping.json"),
            output_dir: PathBuf::from("."),
            primary_file: "matches.json".to_string(),
            secondary_file: "matches_other.json".to_string(),
            default_logo: DEFAULT_LOGO_URL.to_string(),
            stream_scheme: DEFAULT_STREAM_SCHEME.to_string(),
            excluded_competitions: DEFAULT_EXCLUDED_COMPETITIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extra_aliases: BTreeMap::new(),
            league_folders: BTreeMap::new(),
            request_timeout_secs: 10,
        }
    }
}

impl CatalogConfig {
    /// Platform config file location, e.g. `~/.config/match-catalog/config.json`
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load from `path` when given (it must exist), else from the platform
    /// config file if present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        if let Some(path) = path {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => Self::load_from(&default),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let config: CatalogConfig =
            serde_json::from_str(&content).map_err(|e| CatalogError::json(path, e))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn save(&self) -> Result<(), CatalogError> {
        let path = Self::default_path()
            .ok_or_else(|| CatalogError::Config("cannot determine config directory".to_string()))?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| CatalogError::io(dir, e))?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| CatalogError::json(&path, e))?;
        fs::write(&path, content).map_err(|e| CatalogError::io(&path, e))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.stream_scheme.trim().is_empty() {
            return Err(CatalogError::Config("stream_scheme must not be empty".to_string()));
        }
        if self.primary_file.trim().is_empty() || self.secondary_file.trim().is_empty() {
            return Err(CatalogError::Config("output file names must not be empty".to_string()));
        }
        if self.primary_file == self.secondary_file {
            return Err(CatalogError::Config(
                "primary_file and secondary_file must differ".to_string(),
            ));
        }
        Ok(())
    }

    pub fn primary_output(&self) -> PathBuf {
        self.output_dir.join(&self.primary_file)
    }

    pub fn secondary_output(&self) -> PathBuf {
        self.output_dir.join(&self.secondary_file)
    }

    pub fn playlist_format(&self) -> PlaylistFormat {
        PlaylistFormat {
            stream_scheme: self.stream_scheme.clone(),
            default_logo: self.default_logo.clone(),
        }
    }

    pub fn alias_table(&self) -> AliasTable {
        let mut aliases = AliasTable::builtin();
        for (alias, canonical) in &self.extra_aliases {
            aliases.insert(alias, canonical);
        }
        aliases
    }

    pub fn league_table(&self) -> LeagueTable {
        let mut leagues = LeagueTable::builtin();
        for (fragment, folder) in self.league_folders.iter().rev() {
            leagues.prepend(fragment, folder);
        }
        leagues
    }

    /// Assemble the pipeline's lookup tables from already-loaded listings
    pub fn lookups(&self, logo_files: &[LogoFile], channel_names: HashMap<String, String>) -> Lookups {
        Lookups {
            logos: LogoResolver::new(
                LogoIndex::new(logo_files),
                self.alias_table(),
                self.league_table(),
            ),
            channels: ChannelResolver::new(channel_names),
            filter: CompetitionFilter::new(&self.excluded_competitions),
            format: self.playlist_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CatalogConfig =
            serde_json::from_str(r#"{ "output_dir": "out", "extra_aliases": { "blaugrana": "FC Barcelona" } }"#)
                .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.stream_scheme, DEFAULT_STREAM_SCHEME);
        assert_eq!(config.primary_output(), PathBuf::from("out").join("matches.json"));
        assert_eq!(config.alias_table().lookup("Blaugrana"), Some("FC Barcelona"));
    }

    #[test]
    fn test_validate_rejects_same_outputs() {
        let config = CatalogConfig {
            secondary_file: "matches.json".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CatalogError::Config(_))));
    }

    #[test]
    fn test_league_overrides_take_precedence() {
        let mut config = CatalogConfig::default();
        config
            .league_folders
            .insert("liga".to_string(), "Mexico - Liga MX".to_string());
        assert_eq!(config.league_table().folder_for("Liga MX"), Some("Mexico - Liga MX"));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let missing = std::env::temp_dir().join("match-catalog-no-such-config.json");
        assert!(matches!(
            CatalogConfig::load(Some(&missing)),
            Err(CatalogError::Io { .. })
        ));
    }
}
