use medialib_media::MediaFile;
use serde::{Deserialize, Serialize};

/// One element of the JSON array, before validation.
///
/// Only `fullpath` is required by the decoder. A missing `type` or
/// `metadata` decodes as empty and is left for the
/// [`Validator`](crate::Validator) to reject. Metadata keeps the order of
/// the JSON object, both ways; a duplicate key keeps its first position and
/// its last value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawMediaRecord {
    pub fullpath: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, with = "ordered_map")]
    pub metadata: Vec<(String, String)>,
}
impl From<&MediaFile> for RawMediaRecord {
    fn from(file: &MediaFile) -> Self {
        Self {
            fullpath: file.path().to_string(),
            kind: file.kind().to_string(),
            metadata: file
                .metadata()
                .iter()
                .map(|entry| (entry.keyword().to_string(), entry.value().to_string()))
                .collect(),
        }
    }
}

/// A JSON object of string values as an ordered list of pairs.
mod ordered_map {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt::{Formatter, Result as FmtResult};

    pub fn serialize<S: Serializer>(entries: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (keyword, value) in entries {
            map.serialize_entry(keyword, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<(String, String)>, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }

    struct EntriesVisitor;
    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
            f.write_str("an object of metadata keywords to string values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut entries: Vec<(String, String)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((keyword, value)) = access.next_entry::<String, String>()? {
                match entries.iter_mut().find(|(existing, _)| *existing == keyword) {
                    Some(entry) => entry.1 = value,
                    None => entries.push((keyword, value)),
                }
            }
            Ok(entries)
        }
    }
}
