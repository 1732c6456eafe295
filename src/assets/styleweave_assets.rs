#![allow(missing_docs)] // Derive macros generate undocumented methods.

cfg_if::cfg_if!(
    if #[cfg(feature = "assets")] {
        use std::borrow::Cow;

        use rust_embed::RustEmbed;

        use crate::assets::assets::PaletteSource;

        /// Embedded base palettes bundled with the styleweave crate.
        #[derive(RustEmbed)]
        #[folder = "assets/"]
        #[include = "base/*.json"]
        #[exclude = "*.DS_Store"]
        pub struct StyleweaveAssets;

        impl PaletteSource for StyleweaveAssets {
            fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
                <Self as RustEmbed>::get(path).map(|f| f.data)
            }

            fn list(&self, prefix: &str) -> Vec<String> {
                StyleweaveAssets::iter()
                    .filter_map(|p| p.starts_with(prefix).then(|| p.into()))
                    .collect()
            }
        }

    }
);
