use anyhow::Context;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use super::schema::{StyleConfig, ThemeVariant, TokenMap};
use crate::assets::PaletteSources;

/// Named base palettes that theme variants derive from.
///
/// This is the registry an external theming plugin would supply: a variant
/// names one of these palettes and overrides individual roles on top of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteRegistry {
    palettes: IndexMap<String, TokenMap>,
}

/// Failure to resolve a theme variant against a palette registry.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("variant \"{variant}\" derives from unknown base palette \"{base}\"")]
    UnknownBase { variant: String, base: String },
}

impl PaletteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, palette: TokenMap) {
        self.palettes.insert(name.into(), palette);
    }

    pub fn get(&self, name: &str) -> Option<&TokenMap> {
        self.palettes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.palettes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Loads every `base/*.json` palette the sources can serve. Earlier
    /// sources shadow later ones.
    pub fn from_sources<const N: usize>(sources: &PaletteSources<N>) -> anyhow::Result<Self>
    where
        [Box<dyn crate::assets::PaletteSource>; N]:
            smallvec::Array<Item = Box<dyn crate::assets::PaletteSource>>,
    {
        let mut registry = Self::default();

        for path in sources.list("base/") {
            let Some(name) = path
                .strip_prefix("base/")
                .and_then(|name| name.strip_suffix(".json"))
            else {
                continue;
            };
            if registry.contains(name) {
                continue;
            }

            let Some(bytes) = sources.load(&path)? else {
                continue;
            };
            let palette: TokenMap = serde_json::from_slice(&bytes)
                .with_context(|| format!("malformed base palette \"{path}\""))?;

            debug!(palette = name, roles = palette.len(), "registered base palette");
            registry.insert(name, palette);
        }

        Ok(registry)
    }

    /// The registry of base palettes embedded in the crate.
    #[cfg(feature = "assets")]
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_sources(&crate::palette_sources![crate::StyleweaveAssets])
    }
}

impl ThemeVariant {
    /// Resolves this variant against the registry: the base palette first,
    /// then the variant's own roles on top, overrides winning.
    pub fn resolve(&self, registry: &PaletteRegistry) -> Result<TokenMap, ResolveError> {
        let mut palette = match &self.base {
            Some(base) => registry
                .get(base)
                .cloned()
                .ok_or_else(|| ResolveError::UnknownBase {
                    variant: self.name.clone(),
                    base: base.clone(),
                })?,
            None => TokenMap::default(),
        };

        for (role, value) in &self.colors {
            palette.set(role.clone(), value.clone());
        }

        Ok(palette)
    }
}

impl StyleConfig {
    /// Resolves every variant in declared order into a map of variant name
    /// to effective palette. A redefined name keeps the later declaration's
    /// palette and position.
    pub fn resolve_variants(
        &self,
        registry: &PaletteRegistry,
    ) -> Result<IndexMap<String, TokenMap>, ResolveError> {
        let mut resolved = IndexMap::with_capacity(self.variants.len());

        for variant in self.variants.iter() {
            let palette = variant.resolve(registry)?;

            if resolved.shift_remove(&variant.name).is_some() {
                debug!(variant = %variant.name, "variant redefined, later declaration wins");
            }
            resolved.insert(variant.name.clone(), palette);
        }

        Ok(resolved)
    }
}
