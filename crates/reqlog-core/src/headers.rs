//! Header selection for the before-phase log line.

use std::collections::BTreeMap;

use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// Which request headers appear in the before-log.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Header logging disabled; selection is never invoked.
    #[default]
    None,
    /// Every raw header, sorted lexicographically by key.
    All,
    /// Only headers whose name matches one of these, case-insensitively.
    Only(Vec<String>),
}

impl HeaderMode {
    /// Whether the before-phase emits a `Headers:` line at all.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Select headers from the raw mapping.
    ///
    /// Entries are returned under their original casing and sorted by key.
    /// Each raw entry is included at most once, regardless of how many
    /// requested names it matches.
    pub fn select(&self, raw: &[(String, String)]) -> BTreeMap<String, String> {
        match self {
            Self::None => BTreeMap::new(),
            Self::All => raw
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            Self::Only(names) => raw
                .iter()
                .filter(|(key, _)| names.iter().any(|name| name.eq_ignore_ascii_case(key)))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }
}

// Accepted configuration shapes: the string "all", the string "none", a
// single header name, or a list of names.
impl<'de> Deserialize<'de> for HeaderMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            One(String),
            Many(Vec<String>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::One(s) if s.eq_ignore_ascii_case("all") => Ok(Self::All),
            Repr::One(s) if s.eq_ignore_ascii_case("none") => Ok(Self::None),
            Repr::One(s) if s.is_empty() => Err(D::Error::custom("empty header name")),
            Repr::One(s) => Ok(Self::Only(vec![s])),
            Repr::Many(names) => Ok(Self::Only(names)),
        }
    }
}

impl Serialize for HeaderMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::None => serializer.serialize_str("none"),
            Self::All => serializer.serialize_str("all"),
            Self::Only(names) => {
                let mut seq = serializer.serialize_seq(Some(names.len()))?;
                for name in names {
                    seq.serialize_element(name)?;
                }
                seq.end()
            }
        }
    }
}
