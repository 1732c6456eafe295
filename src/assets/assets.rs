use std::borrow::Cow;

use anyhow::{Result, anyhow};
use smallvec::SmallVec;

/// An ordered chain of palette sources; the first source that can serve a
/// path wins.
pub struct PaletteSources<const N: usize>
where
    [Box<dyn PaletteSource>; N]: smallvec::Array<Item = Box<dyn PaletteSource>>,
{
    providers: SmallVec<[Box<dyn PaletteSource>; N]>,
}

impl<const N: usize> PaletteSources<N>
where
    [Box<dyn PaletteSource>; N]: smallvec::Array<Item = Box<dyn PaletteSource>>,
{
    pub fn new(providers: [Box<dyn PaletteSource>; N]) -> PaletteSources<N> {
        Self {
            providers: SmallVec::from(providers),
        }
    }

    pub fn load(&self, path: &str) -> Result<Option<Cow<'static, [u8]>>> {
        if path.is_empty() {
            return Ok(None);
        }

        for provider in &self.providers {
            let palette = provider.get(path);

            if palette.is_some() {
                return Ok(palette);
            }
        }

        Err(anyhow!("could not find palette asset at path \"{path}\""))
    }

    pub fn list(&self, prefix: &str) -> Vec<String> {
        self.providers
            .iter()
            .flat_map(|provider| provider.list(prefix))
            .collect()
    }
}

#[macro_export]
macro_rules! palette_sources {
    ( $( $item:expr ),* $(,)? ) => {
        $crate::PaletteSources::new([
            $( Box::new($item) ),*
        ])
    };
}

pub trait PaletteSource: Send + Sync {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>>;
    fn list(&self, prefix: &str) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, &'static [u8]);

    impl PaletteSource for Fixed {
        fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
            (path == self.0).then(|| Cow::Borrowed(self.1))
        }

        fn list(&self, prefix: &str) -> Vec<String> {
            self.0
                .starts_with(prefix)
                .then(|| self.0.to_owned())
                .into_iter()
                .collect()
        }
    }

    #[test]
    fn test_earlier_sources_win() {
        let sources = palette_sources![
            Fixed("base/light.json", b"{\"primary\": \"#111111\"}"),
            Fixed("base/light.json", b"{\"primary\": \"#222222\"}"),
        ];

        let bytes = sources.load("base/light.json").unwrap().unwrap();
        assert_eq!(&*bytes, b"{\"primary\": \"#111111\"}");
    }

    #[test]
    fn test_miss_across_all_sources_is_an_error() {
        let sources = palette_sources![Fixed("base/light.json", b"{}")];
        assert!(sources.load("base/sepia.json").is_err());
    }

    #[test]
    fn test_empty_path_is_not_an_error() {
        let sources = palette_sources![Fixed("base/light.json", b"{}")];
        assert!(sources.load("").unwrap().is_none());
    }

    #[test]
    fn test_list_concatenates_providers() {
        let sources = palette_sources![
            Fixed("base/light.json", b"{}"),
            Fixed("base/dark.json", b"{}"),
        ];

        let listed = sources.list("base/");
        assert_eq!(listed, ["base/light.json", "base/dark.json"]);
    }
}
