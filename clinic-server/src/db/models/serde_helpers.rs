//! Serde adapters for SurrealDB record links
//!
//! Content rows reference media and categories through record ids. On the
//! wire the admin dashboard speaks `"table:id"` strings, while rows read
//! back from SurrealDB may carry native `RecordId` values, so every link
//! field must deserialize from either shape and always serialize back to
//! the string form. The `with = "..."` modules below cover the field
//! shapes the models use: required, optional, list, optional list.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;
use surrealdb::RecordId;

/// Missing boolean columns read as true (pre-existing rows)
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// Missing boolean columns read as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Accept `"table:id"` strings and native RecordId maps alike
fn deserialize_link<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    struct LinkVisitor;

    impl<'de> Visitor<'de> for LinkVisitor {
        type Value = RecordId;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a 'table:id' string or a RecordId")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            value
                .parse::<RecordId>()
                .map_err(|_| de::Error::custom(format!("invalid record id: {value}")))
        }

        fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            RecordId::deserialize(de::value::MapAccessDeserializer::new(map))
        }
    }

    deserializer.deserialize_any(LinkVisitor)
}

/// Already-parsed link, kept for the Option/Vec adapters below
#[derive(Debug, Clone)]
struct Link(RecordId);

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_link(deserializer).map(Link)
    }
}

/// `RecordId` field (`with = "serde_helpers::record_id"`)
pub mod record_id {
    use super::*;

    pub fn serialize<S>(id: &RecordId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&id.to_string())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<RecordId, D::Error>
    where
        D: Deserializer<'de>,
    {
        super::deserialize_link(d)
    }
}

/// `Option<RecordId>` field
pub mod option_record_id {
    use super::*;

    pub fn serialize<S>(id: &Option<RecordId>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => s.serialize_some(&id.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Link>::deserialize(d)?.map(|link| link.0))
    }
}

/// `Vec<RecordId>` field (post → category links)
pub mod vec_record_id {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S>(ids: &[RecordId], s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = s.serialize_seq(Some(ids.len()))?;
        for id in ids {
            seq.serialize_element(&id.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Vec<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Vec::<Link>::deserialize(d)?
            .into_iter()
            .map(|link| link.0)
            .collect())
    }
}

/// `Option<Vec<RecordId>>` field (partial-update payloads)
pub mod option_vec_record_id {
    use super::*;

    pub fn serialize<S>(ids: &Option<Vec<RecordId>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ids {
            Some(ids) => super::vec_record_id::serialize(ids, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<Vec<RecordId>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Vec<Link>>::deserialize(d)?
            .map(|links| links.into_iter().map(|link| link.0).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "record_id")]
        author: RecordId,
        #[serde(default, with = "option_record_id")]
        image: Option<RecordId>,
        #[serde(default, with = "vec_record_id")]
        categories: Vec<RecordId>,
    }

    #[test]
    fn links_round_trip_as_strings() {
        let row: Row = serde_json::from_str(
            r#"{"author": "user:7", "image": "media:123", "categories": ["category:1", "category:2"]}"#,
        )
        .unwrap();
        assert_eq!(row.author.to_string(), "user:7");
        assert_eq!(row.image.as_ref().unwrap().to_string(), "media:123");
        assert_eq!(row.categories.len(), 2);

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"media:123\""));
        assert!(json.contains("\"category:2\""));
    }

    #[test]
    fn absent_links_default_to_empty() {
        let row: Row = serde_json::from_str(r#"{"author": "user:7"}"#).unwrap();
        assert!(row.image.is_none());
        assert!(row.categories.is_empty());
    }

    #[test]
    fn malformed_link_strings_are_rejected() {
        assert!(
            serde_json::from_str::<Row>(r#"{"author": "user:7", "image": "no-table-part"}"#)
                .is_err()
        );
    }
}
