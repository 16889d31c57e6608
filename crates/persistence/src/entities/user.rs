//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::Role;

/// Database row mapping for the users table.
///
/// The role column is free text; unknown values degrade to VIEWER rather
/// than failing the whole row.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            name: entity.name,
            role: Role::from_str(&entity.role).unwrap_or(Role::Viewer),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(role: &str) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            email: "op@gis-kb.ru".to_string(),
            password_hash: "$argon2id$...".to_string(),
            name: "Оператор".to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_conversion() {
        let user: domain::models::User = entity("ADMIN").into();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_unknown_role_degrades_to_viewer() {
        let user: domain::models::User = entity("OPERATOR").into();
        assert_eq!(user.role, Role::Viewer);
    }
}
