use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned identifiers are opaque to the client.
///
/// The story API issues integer ids, and JSON object keys carry those same
/// ids as strings, so every id accepts either shape on input. Purely numeric
/// ids are written back as JSON numbers; anything else is written as a string.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the id as an integer when it is purely numeric.
            pub fn as_number(&self) -> Option<i64> {
                numeric(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value.to_string())
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value.to_string())
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        /// Numeric ids sort numerically and ahead of non-numeric ones.
        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                compare_ids(&self.0, &other.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match numeric(&self.0) {
                    Some(n) => serializer.serialize_i64(n),
                    None => serializer.serialize_str(&self.0),
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(IdVisitor).map(Self)
            }
        }
    };
}

/// Parses `raw` as an integer only if it prints back identically, so "007"
/// stays a string and keeps its leading zeros.
fn numeric(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|n| n.to_string() == raw)
}

fn compare_ids(a: &str, b: &str) -> Ordering {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
}

define_id!(
    /// Identifier of a story document.
    StoryId
);
define_id!(
    /// Identifier of a node, unique within its story.
    NodeId
);
define_id!(
    /// Identifier of a story generation job.
    JobId
);

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn accepts_numbers_and_strings() {
        let a: NodeId = serde_json::from_str("12").unwrap();
        let b: NodeId = serde_json::from_str("\"12\"").unwrap();
        let c: NodeId = serde_json::from_str("\"intro\"").unwrap();

        assert_eq!(a, b);
        assert_eq!(a.as_number(), Some(12));
        assert_eq!(c.as_str(), "intro");
        assert_eq!(c.as_number(), None);
    }

    #[test]
    fn numeric_ids_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&NodeId::from(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&NodeId::from("B")).unwrap(), "\"B\"");
        assert_eq!(serde_json::to_string(&NodeId::from("007")).unwrap(), "\"007\"");
    }

    #[test]
    fn ids_work_as_json_object_keys() {
        let map: HashMap<NodeId, u8> = serde_json::from_str(r#"{"1": 1, "B": 2}"#).unwrap();
        assert_eq!(map.get(&NodeId::from(1)), Some(&1));
        assert_eq!(map.get(&NodeId::from("B")), Some(&2));
    }

    #[test]
    fn ordering_is_numeric_first() {
        let mut ids = vec![
            NodeId::from("b"),
            NodeId::from(10),
            NodeId::from("a"),
            NodeId::from(2),
        ];
        ids.sort();
        let rendered: Vec<&str> = ids.iter().map(NodeId::as_str).collect();
        assert_eq!(rendered, vec!["2", "10", "a", "b"]);
    }
}
