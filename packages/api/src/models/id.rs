use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier.
///
/// The API is not consistent about identifiers: some routes send numbers, some
/// strings, some use `_id`. Everything is normalised to a string on arrival.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Id(s),
            Raw::Number(n) => Id(n.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids() {
        let a: Id = serde_json::from_str("42").unwrap();
        let b: Id = serde_json::from_str(r#""64f1c0""#).unwrap();
        assert_eq!(a.as_str(), "42");
        assert_eq!(b.to_string(), "64f1c0");
        assert_eq!(serde_json::to_string(&a).unwrap(), r#""42""#);
    }
}
