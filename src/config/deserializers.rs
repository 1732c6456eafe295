use std::fmt;

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer,
    de::{Error, MapAccess, Visitor},
};
use smallvec::{SmallVec, smallvec};

use super::schema::{ThemeVariant, TokenMap};

pub fn de_string_or_non_empty_list<'de, D>(
    deserializer: D,
) -> Result<SmallVec<[String; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        One(String),
        Many(SmallVec<[String; 2]>),
    }

    let value = StringOrVec::deserialize(deserializer)?;

    match value {
        StringOrVec::One(string) => Ok(smallvec![string]),
        StringOrVec::Many(vec) => {
            if vec.is_empty() {
                return Err(D::Error::custom("list can't be empty."));
            }

            Ok(vec)
        }
    }
}

pub fn de_variants<'de, D>(deserializer: D) -> Result<SmallVec<[ThemeVariant; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SmallVec::deserialize(deserializer)?;

    if value.is_empty() {
        return Err(D::Error::custom(
            "at least one theme variant needs to be provided.",
        ));
    }

    Ok(value)
}

/// A token value is either a plain string or a nested group whose members
/// flatten into `parent-member` names, with `DEFAULT` collapsing to the
/// parent name itself.
#[derive(Deserialize)]
#[serde(untagged)]
enum TokenValue {
    Leaf(String),
    Group(TokenMap),
}

impl<'de> Deserialize<'de> for TokenMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TokenMapVisitor;

        impl<'de> Visitor<'de> for TokenMapVisitor {
            type Value = TokenMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of token names to values or nested groups")
            }

            fn visit_map<A>(self, mut access: A) -> Result<TokenMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut tokens = IndexMap::with_capacity(access.size_hint().unwrap_or(0));

                while let Some((name, value)) = access.next_entry::<String, TokenValue>()? {
                    match value {
                        TokenValue::Leaf(value) => {
                            insert_unique(&mut tokens, name, value).map_err(A::Error::custom)?;
                        }
                        TokenValue::Group(group) => {
                            for (member, value) in group {
                                let flattened = if member == "DEFAULT" {
                                    name.clone()
                                } else {
                                    format!("{name}-{member}")
                                };
                                insert_unique(&mut tokens, flattened, value)
                                    .map_err(A::Error::custom)?;
                            }
                        }
                    }
                }

                Ok(TokenMap::from_index_map(tokens))
            }
        }

        deserializer.deserialize_map(TokenMapVisitor)
    }
}

fn insert_unique(
    tokens: &mut IndexMap<String, String>,
    name: String,
    value: String,
) -> Result<(), String> {
    match tokens.entry(name) {
        indexmap::map::Entry::Occupied(entry) => {
            Err(format!("duplicate token name \"{}\"", entry.key()))
        }
        indexmap::map::Entry::Vacant(entry) => {
            entry.insert(value);
            Ok(())
        }
    }
}

impl<'de> Deserialize<'de> for ThemeVariant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum VariantForm {
            Full {
                name: String,
                #[serde(default)]
                base: Option<String>,
                #[serde(default)]
                colors: TokenMap,
            },
            // The shorthand form binds the palette name as the only key:
            // `{ "light": { "primary": "#6366f1" } }`.
            Shorthand(IndexMap<String, TokenMap>),
        }

        match VariantForm::deserialize(deserializer)? {
            VariantForm::Full { name, base, colors } => Ok(ThemeVariant { name, base, colors }),
            VariantForm::Shorthand(entries) => {
                let mut entries = entries.into_iter();
                let Some((name, colors)) = entries.next() else {
                    return Err(D::Error::custom(
                        "variant shorthand needs exactly one named palette.",
                    ));
                };
                if entries.next().is_some() {
                    return Err(D::Error::custom(
                        "variant shorthand needs exactly one named palette.",
                    ));
                }

                Ok(ThemeVariant {
                    name,
                    base: None,
                    colors,
                })
            }
        }
    }
}
