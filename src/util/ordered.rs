use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A map-shaped list of key/value pairs which keeps the order the keys were
/// written in, duplicates included.
///
/// Transition rows are sampled by scanning labels in the order they were given,
/// so a config file's key order has to survive the trip through serde. Repeated
/// keys are passed through for the caller to reject.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedEntries<K, V>(pub Vec<(K, V)>);

impl<K, V> From<Vec<(K, V)>> for OrderedEntries<K, V> {
    fn from(entries: Vec<(K, V)>) -> Self {
        OrderedEntries(entries)
    }
}

impl<K: Serialize, V: Serialize> Serialize for OrderedEntries<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedEntriesVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for OrderedEntriesVisitor<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = OrderedEntries<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry()? {
            entries.push(entry);
        }
        Ok(OrderedEntries(entries))
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedEntries<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedEntriesVisitor(PhantomData))
    }
}

#[cfg(test)]
pub mod test {
    use super::OrderedEntries;

    #[test]
    fn test_keeps_file_order() {
        let entries: OrderedEntries<String, f64> =
            ron::from_str(r#"{"yellow": 0.25, "blue": 0.5, "red": 0.25}"#)
                .expect("Failed to parse ordered map");
        let keys: Vec<&str> = entries.0.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["yellow", "blue", "red"]);
    }

    #[test]
    fn test_keeps_duplicates() {
        let entries: OrderedEntries<String, f64> =
            ron::from_str(r#"{"a": 0.5, "a": 0.5}"#).expect("Failed to parse ordered map");
        assert_eq!(entries.0.len(), 2);
    }

    #[test]
    fn test_writes_in_order() {
        let entries = OrderedEntries(vec![("z".to_string(), 1), ("a".to_string(), 2)]);
        let text = ron::to_string(&entries).expect("Failed to write ordered map");
        assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
    }
}
