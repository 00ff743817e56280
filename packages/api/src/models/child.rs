use serde::{Deserialize, Serialize};

use super::Id;

/// A child record, owned either by a family or by the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    #[serde(alias = "_id")]
    pub id: Id,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, alias = "dateOfBirth")]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub family_id: Option<Id>,
}

impl Child {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Birth date as `YYYY-MM-DD`.
    pub fn birth_day(&self) -> Option<&str> {
        self.birth_date
            .as_deref()
            .map(|d| d.split('T').next().unwrap_or(d))
            .filter(|d| !d.is_empty())
    }

    pub fn to_input(&self) -> ChildInput {
        ChildInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            birth_date: self.birth_day().unwrap_or_default().to_string(),
            gender: self.gender.clone().filter(|g| !g.is_empty()),
            notes: self.notes.clone().filter(|n| !n.is_empty()),
        }
    }
}

/// Body of the child create/update routes.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChildInput {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_of_birth_alias() {
        let child: Child = serde_json::from_str(
            r#"{"id":2,"firstName":"Marie","lastName":"Dupont","dateOfBirth":"2018-05-15","gender":"F"}"#,
        )
        .unwrap();
        assert_eq!(child.full_name(), "Marie Dupont");
        assert_eq!(child.birth_day(), Some("2018-05-15"));
        assert_eq!(child.to_input().gender.as_deref(), Some("F"));
    }
}
