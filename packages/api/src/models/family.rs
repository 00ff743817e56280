use serde::{Deserialize, Serialize};

use super::{Child, Id};

/// A family group as returned by `/families`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    #[serde(alias = "_id")]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub patriarch_name: Option<String>,
    #[serde(default)]
    pub matriarch_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub founding_date: Option<String>,
    #[serde(default)]
    pub children: Vec<Child>,
}

impl Family {
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Founding date as `YYYY-MM-DD`, dropping any time component the server adds.
    pub fn founding_day(&self) -> Option<&str> {
        self.founding_date
            .as_deref()
            .map(|d| d.split('T').next().unwrap_or(d))
            .filter(|d| !d.is_empty())
    }

    /// Form input pre-filled from this family.
    pub fn to_input(&self) -> FamilyInput {
        FamilyInput {
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            patriarch_name: self.patriarch_name.clone().unwrap_or_default(),
            matriarch_name: self.matriarch_name.clone().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            founding_date: self.founding_day().map(str::to_string),
        }
    }
}

/// Body of `POST /families` and `PUT /families/:id`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyInput {
    pub name: String,
    pub description: String,
    pub patriarch_name: String,
    pub matriarch_name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founding_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_counts_embedded_children() {
        let family: Family = serde_json::from_str(
            r#"{"id":1,"name":"Dupont","foundingDate":"1950-06-01T00:00:00.000Z",
                "children":[{"id":1,"firstName":"Jean","lastName":"Dupont"}]}"#,
        )
        .unwrap();
        assert_eq!(family.child_count(), 1);
        assert_eq!(family.founding_day(), Some("1950-06-01"));
        assert_eq!(family.to_input().founding_date.as_deref(), Some("1950-06-01"));
    }

    #[test]
    fn test_family_without_optional_fields() {
        let family: Family = serde_json::from_str(r#"{"_id":"f2","name":"Martin"}"#).unwrap();
        assert_eq!(family.child_count(), 0);
        assert_eq!(family.founding_day(), None);
        assert_eq!(family.to_input().description, "");
    }
}
