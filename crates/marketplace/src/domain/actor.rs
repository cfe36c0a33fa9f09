use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
    Admin,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buyer" => Some(Role::Buyer),
            "seller" => Some(Role::Seller),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// The authenticated caller, resolved from the access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub roles: Vec<Role>,
}

impl Actor {
    pub fn new(user_id: i64, roles: Vec<Role>) -> Self {
        Self { user_id, roles }
    }

    /// Unknown role names are dropped.
    pub fn from_claims(user_id: i64, raw_roles: &[String]) -> Self {
        let roles = raw_roles.iter().filter_map(|r| Role::parse(r)).collect();
        Self { user_id, roles }
    }

    pub fn buyer(user_id: i64) -> Self {
        Self::new(user_id, vec![Role::Buyer])
    }

    pub fn seller(user_id: i64) -> Self {
        Self::new(user_id, vec![Role::Seller])
    }

    pub fn admin(user_id: i64) -> Self {
        Self::new(user_id, vec![Role::Admin])
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_seller(&self) -> bool {
        self.has_role(Role::Seller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_with_unknown_roles_keep_known_ones() {
        let actor = Actor::from_claims(9, &["Seller".into(), "superuser".into()]);
        assert_eq!(actor.roles, vec![Role::Seller]);
        assert!(actor.is_seller());
        assert!(!actor.is_admin());
    }
}
