//! Serde shapes of the two input documents, before validation.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// A JSON object deserialized with its key order (and any duplicate keys) intact.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

/// `{ "questions": { <theme>: [ { <questionId>: <prompt> }, ... ] } }`
#[derive(Debug, Deserialize)]
pub struct ThemeDocument {
    pub questions: OrderedMap<Vec<OrderedMap<String>>>,
}

/// `{ <questionId>: { "answersAvailable": .., "gradientAvailable": .., "data": [..] } }`
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct CountryDocument {
    pub records: OrderedMap<RawRecord>,
}

/// Availability flag as written in the dataset. A missing flag reads as `No`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Flag {
    #[serde(alias = "yes", alias = "YES")]
    Yes,
    #[default]
    #[serde(alias = "no", alias = "NO")]
    No,
}

impl Flag {
    pub fn is_yes(self) -> bool {
        self == Flag::Yes
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub answers_available: Flag,
    #[serde(default)]
    pub gradient_available: Flag,
    #[serde(default)]
    pub data: Vec<RawEntry>,
}

/// An answer or subanswer entry. Country percentages and the self-keyed
/// subanswer list share the object with the label, so they land in `fields`.
#[derive(Debug, Deserialize)]
pub struct RawEntry {
    pub answer: Option<String>,
    #[serde(rename = "subAnswer")]
    pub sub_answer: Option<String>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}
