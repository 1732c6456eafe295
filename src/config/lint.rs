use std::{collections::HashSet, fmt};

use tracing::warn;

use super::schema::StyleConfig;
use crate::utils::{Length, Rgba};

/// A non-fatal defect found in a configuration.
///
/// The record itself carries these values untouched; rejecting them is the
/// consuming build tool's job. Lint surfaces them before the build does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintIssue {
    UnparsableColor { token: String, value: String },
    UnparsableRadius { token: String, value: String },
    DuplicateVariantName { name: String },
    RepeatedPlugin { plugin: String },
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintIssue::UnparsableColor { token, value } => {
                write!(f, "color token \"{token}\" has unparsable value \"{value}\"")
            }
            LintIssue::UnparsableRadius { token, value } => {
                write!(f, "radius token \"{token}\" has unparsable value \"{value}\"")
            }
            LintIssue::DuplicateVariantName { name } => {
                write!(f, "variant \"{name}\" is declared more than once")
            }
            LintIssue::RepeatedPlugin { plugin } => {
                write!(f, "plugin \"{plugin}\" is referenced more than once")
            }
        }
    }
}

impl StyleConfig {
    /// Checks the record for values the build tool will choke on. Returns
    /// every issue found; never fails the load.
    pub fn lint(&self) -> Vec<LintIssue> {
        let mut issues = Vec::new();

        // Only hex forms are checked; functional notations like rgba(...)
        // stay opaque to this crate.
        for (token, value) in &self.tokens.colors {
            if value.starts_with('#') && Rgba::parse(value).is_err() {
                issues.push(LintIssue::UnparsableColor {
                    token: token.clone(),
                    value: value.clone(),
                });
            }
        }

        for variant in self.variants.iter() {
            for (role, value) in &variant.colors {
                if value.starts_with('#') && Rgba::parse(value).is_err() {
                    issues.push(LintIssue::UnparsableColor {
                        token: format!("{}.{role}", variant.name),
                        value: value.clone(),
                    });
                }
            }
        }

        for (token, value) in &self.tokens.radii {
            if value.parse::<Length>().is_err() {
                issues.push(LintIssue::UnparsableRadius {
                    token: token.clone(),
                    value: value.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for variant in self.variants.iter() {
            if !seen.insert(variant.name.as_str()) {
                issues.push(LintIssue::DuplicateVariantName {
                    name: variant.name.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if !seen.insert(plugin.as_str()) {
                issues.push(LintIssue::RepeatedPlugin {
                    plugin: plugin.as_str().to_owned(),
                });
            }
        }

        for issue in &issues {
            warn!(%issue, "configuration lint");
        }

        issues
    }
}
