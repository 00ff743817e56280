use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Permissions {
    pub can_manage_profiles: bool,
    pub can_manage_settings: bool,
    pub can_invite_members: bool,
    pub can_view_history: bool,
    pub can_manage_permissions: bool,
    pub is_admin: bool,
}

impl Permissions {
    /// Labelled flags in display order.
    pub fn flags(&self) -> [(&'static str, bool); 6] {
        [
            ("Manage profiles", self.can_manage_profiles),
            ("Manage settings", self.can_manage_settings),
            ("Invite members", self.can_invite_members),
            ("View history", self.can_view_history),
            ("Manage permissions", self.can_manage_permissions),
            ("Administrator", self.is_admin),
        ]
    }

    /// Flip the flag at `index` (same order as [`Permissions::flags`]).
    pub fn toggle(&mut self, index: usize) {
        let flag = match index {
            0 => &mut self.can_manage_profiles,
            1 => &mut self.can_manage_settings,
            2 => &mut self.can_invite_members,
            3 => &mut self.can_view_history,
            4 => &mut self.can_manage_permissions,
            5 => &mut self.is_admin,
            _ => return,
        };
        *flag = !*flag;
    }
}

/// A user as listed by `GET /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagedUser {
    #[serde(alias = "_id")]
    pub id: Id,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub permissions: Permissions,
}

impl ManagedUser {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) => format!("{f} {l}"),
            (Some(n), None) | (None, Some(n)) => n.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_by_index() {
        let mut p = Permissions::default();
        p.toggle(2);
        p.toggle(5);
        assert!(p.can_invite_members);
        assert!(p.is_admin);
        p.toggle(5);
        p.toggle(99);
        assert!(!p.is_admin);
        assert_eq!(p.flags().iter().filter(|(_, on)| *on).count(), 1);
    }

    #[test]
    fn test_partial_permissions_default_to_false() {
        let user: ManagedUser = serde_json::from_str(
            r#"{"_id":"u1","email":"a@b.c","permissions":{"isAdmin":true}}"#,
        )
        .unwrap();
        assert!(user.permissions.is_admin);
        assert!(!user.permissions.can_view_history);
        assert_eq!(user.display_name(), "a@b.c");
    }
}
