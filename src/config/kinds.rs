#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use serde::{Deserialize, Serialize};

/// How the generated stylesheet switches into dark mode.
///
/// Use `css_trigger()` to get the CSS mechanism the strategy stands for.
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[func(pub fn css_trigger(&self) -> &'static str)]
pub enum DarkModeStrategy {
    /// Dark styles apply under an ancestor element carrying the dark class.
    #[assoc(css_trigger = ".dark")]
    Class,
    /// Dark styles follow the user agent's color-scheme preference.
    #[assoc(css_trigger = "@media (prefers-color-scheme: dark)")]
    Media,
}

impl Default for DarkModeStrategy {
    fn default() -> Self {
        Self::Class
    }
}

/// Classification of a theme variant as a light or dark palette.
///
/// Each kind resolves to the embedded base palette it derives from.
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[func(pub fn base_asset(&self) -> &'static str)]
pub enum VariantKind {
    #[assoc(base_asset = "base/light.json")]
    Light,
    #[assoc(base_asset = "base/dark.json")]
    Dark,
}

impl VariantKind {
    /// Classifies a variant by its name. Anything not recognizably dark
    /// counts as light.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.contains("dark") || name.contains("night") {
            Self::Dark
        } else {
            Self::Light
        }
    }
}
