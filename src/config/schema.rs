use std::{
    fmt, fs, io,
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use thiserror::Error;
use tracing::debug;

use super::deserializers::{de_string_or_non_empty_list, de_variants};
use super::kinds::{DarkModeStrategy, VariantKind};

/// The styling-configuration record consumed by the CSS build pipeline.
///
/// A configuration is read once at build-tool startup and treated as
/// immutable data from then on. Every sequence and map in it preserves
/// declared order on read-back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub dark_mode: DarkModeStrategy,
    #[serde(
        default,
        skip_serializing_if = "SmallVec::is_empty",
        deserialize_with = "de_string_or_non_empty_list"
    )]
    pub content: SmallVec<[String; 2]>,
    #[serde(default)]
    pub tokens: ThemeTokens,
    #[serde(default)]
    pub variants: ThemeVariants,
    #[serde(default)]
    pub plugins: SmallVec<[PluginRef; 2]>,
}

/// Errors produced while loading or serializing a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed configuration")]
    Parse(#[from] serde_json::Error),
}

macro_rules! generate_builtin_configs {
    ( $( [$path:literal, $name:ident] ),+ ) => {
        $(
            pub const $name: LazyLockConfig = LazyLockConfig::new(|| StyleConfig::from_string(include_str!($path)).unwrap());
        )+
    };
}

pub struct LazyLockConfig(LazyLock<StyleConfig>);

impl LazyLockConfig {
    #[inline(always)]
    const fn new(f: fn() -> StyleConfig) -> Self {
        Self(LazyLock::new(f))
    }
}

impl Deref for LazyLockConfig {
    type Target = StyleConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LazyLockConfig {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<StyleConfig> for LazyLockConfig {
    fn as_ref(&self) -> &StyleConfig {
        &self.0
    }
}

impl StyleConfig {
    generate_builtin_configs!(["../../presets/default.json", DEFAULT]);

    /// Parses a configuration from JSON text.
    pub fn from_string<S: AsRef<str>>(str: S) -> Result<StyleConfig, ConfigError> {
        Ok(serde_json::from_str(str.as_ref())?)
    }

    /// Reads and parses a configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<StyleConfig, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_string(contents)?;

        debug!(
            path = %path.display(),
            variants = config.variants.len(),
            "loaded styling configuration"
        );

        Ok(config)
    }

    /// Serializes the configuration back to JSON.
    pub fn to_string_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The theme extension tokens: semantic name to CSS value string, one map
/// per token family. Values are carried verbatim; the build tool owns their
/// interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeTokens {
    pub colors: TokenMap,
    pub shadows: TokenMap,
    pub radii: TokenMap,
}

/// An insertion-ordered map of unique token names to value strings.
///
/// Deserialization rejects duplicate names and flattens nested groups
/// (`brand: { DEFAULT, foreground }` reads as `brand`, `brand-foreground`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct TokenMap(IndexMap<String, String>);

impl TokenMap {
    pub(crate) fn from_index_map(tokens: IndexMap<String, String>) -> Self {
        Self(tokens)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Sets a token value. An existing token keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for TokenMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// The ordered sequence of theme variants. Order determines precedence:
/// when two variants share a name, the later declaration wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeVariants {
    #[serde(deserialize_with = "de_variants")]
    pub variants: SmallVec<[ThemeVariant; 2]>,
}

impl ThemeVariants {
    /// Looks up a variant by name, honoring last-wins precedence.
    pub fn get(&self, name: &str) -> Option<&ThemeVariant> {
        self.variants.iter().rev().find(|v| v.name == name)
    }

    /// Position of the winning declaration for a name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.variants.iter().rposition(|v| v.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ThemeVariant> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl Default for ThemeVariants {
    fn default() -> Self {
        Self {
            variants: smallvec![
                ThemeVariant::from_base("light"),
                ThemeVariant::from_base("dark"),
            ],
        }
    }
}

/// A named palette overriding or extending a base set of semantic color
/// roles. `base` names a palette in the registry the variant derives from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeVariant {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    pub colors: TokenMap,
}

impl ThemeVariant {
    /// A variant deriving from the base palette of the same name, with no
    /// overrides of its own.
    pub fn from_base(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            base: Some(name.clone()),
            name,
            colors: TokenMap::default(),
        }
    }

    pub fn kind(&self) -> VariantKind {
        VariantKind::from_name(&self.name)
    }
}

/// An opaque identifier for a build-time presentation plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginRef(String);

impl PluginRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PluginRef {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_default_carries_brand_tokens() {
        let config = StyleConfig::DEFAULT;

        assert_eq!(config.dark_mode, DarkModeStrategy::Class);
        assert_eq!(config.tokens.colors.get("brand"), Some("#2563eb"));
        assert_eq!(config.tokens.colors.get("brand-foreground"), Some("#ffffff"));
        assert_eq!(config.tokens.colors.get("brand-dark"), Some("#1d4ed8"));
        assert_eq!(config.tokens.radii.get("xl"), Some("1rem"));
        assert!(config.tokens.shadows.contains("card"));
    }

    #[test]
    fn test_builtin_default_variant_order() {
        let config = StyleConfig::DEFAULT;
        let light = config.variants.position("light").unwrap();
        let dark = config.variants.position("dark").unwrap();

        assert!(dark > light, "dark must read back strictly after light");
    }

    #[test]
    fn test_builtin_default_plugin_order() {
        let config = StyleConfig::DEFAULT;
        let plugins: Vec<_> = config.plugins.iter().map(PluginRef::as_str).collect();
        assert_eq!(plugins, ["typography", "themes"]);
    }

    #[test]
    fn test_round_trip_yields_identical_record() {
        let config = StyleConfig::DEFAULT.clone();
        let text = config.to_string_pretty().unwrap();
        let reparsed = StyleConfig::from_string(&text).unwrap();

        assert_eq!(reparsed, config);
        assert_eq!(reparsed.to_string_pretty().unwrap(), text);
    }

    #[test]
    fn test_minimal_config_round_trips() {
        let config = StyleConfig::from_string("{}").unwrap();
        let text = config.to_string_pretty().unwrap();
        let reparsed = StyleConfig::from_string(&text).unwrap();

        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_single_color_token_reads_back_unchanged() {
        let config =
            StyleConfig::from_string(r##"{"tokens": {"colors": {"brand": "#2563eb"}}}"##).unwrap();
        assert_eq!(config.tokens.colors.get("brand"), Some("#2563eb"));
    }

    #[test]
    fn test_content_accepts_single_string() {
        let config =
            StyleConfig::from_string(r#"{"content": "./templates/**/*.html"}"#).unwrap();
        assert_eq!(config.content.as_slice(), ["./templates/**/*.html"]);
    }

    #[test]
    fn test_content_rejects_empty_list() {
        assert!(StyleConfig::from_string(r#"{"content": []}"#).is_err());
    }

    #[test]
    fn test_content_preserves_declared_order() {
        let config = StyleConfig::from_string(
            r#"{"content": ["./templates/**/*.html", "./src/**/*.rs"]}"#,
        )
        .unwrap();
        assert_eq!(
            config.content.as_slice(),
            ["./templates/**/*.html", "./src/**/*.rs"]
        );
    }

    #[test]
    fn test_absent_variants_default_to_light_and_dark() {
        let config = StyleConfig::from_string("{}").unwrap();

        assert_eq!(config.variants.len(), 2);
        assert_eq!(config.variants.get("light").unwrap().base.as_deref(), Some("light"));
        assert_eq!(config.variants.get("dark").unwrap().base.as_deref(), Some("dark"));
    }

    #[test]
    fn test_empty_variant_list_is_rejected() {
        assert!(StyleConfig::from_string(r#"{"variants": []}"#).is_err());
    }

    #[test]
    fn test_variant_order_is_preserved_on_read_back() {
        let config = StyleConfig::from_string(
            r##"{"variants": [
                {"name": "light", "colors": {}},
                {"name": "dark", "colors": {}},
                {"name": "contrast", "colors": {}}
            ]}"##,
        )
        .unwrap();

        let names: Vec<_> = config.variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["light", "dark", "contrast"]);
    }

    #[test]
    fn test_duplicate_variant_lookup_honors_last_wins() {
        let config = StyleConfig::from_string(
            r##"{"variants": [
                {"name": "light", "colors": {"primary": "#111111"}},
                {"name": "light", "colors": {"primary": "#222222"}}
            ]}"##,
        )
        .unwrap();

        let winner = config.variants.get("light").unwrap();
        assert_eq!(winner.colors.get("primary"), Some("#222222"));
        assert_eq!(config.variants.position("light"), Some(1));
    }

    #[test]
    fn test_from_path_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weave.json");
        std::fs::write(&path, r#"{"dark_mode": "media"}"#).unwrap();

        let config = StyleConfig::from_path(&path).unwrap();
        assert_eq!(config.dark_mode, DarkModeStrategy::Media);
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = StyleConfig::from_path(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_variant_kind_classification() {
        let config = StyleConfig::DEFAULT;
        assert_eq!(config.variants.get("light").unwrap().kind(), VariantKind::Light);
        assert_eq!(config.variants.get("dark").unwrap().kind(), VariantKind::Dark);
    }
}
