use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool};
use std::fmt;
use std::str::FromStr;

/// Coarse authorization tag fixed at registration and embedded in session tokens.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is neither `admin` nor `member`.
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A registered account as stored in the `users` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
}

/// Insert payload for a new account. The password must already be hashed.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl User {
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// Inserts the account. A duplicate username fails on the UNIQUE constraint.
    pub async fn create(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?) \
             RETURNING id, username, password_hash, role",
        )
        .bind(new_user.username)
        .bind(new_user.password_hash)
        .bind(new_user.role)
        .fetch_one(pool)
        .await
    }

    /// Ids of every registered user, in ascending order.
    pub async fn all_ids<'e, E>(executor: E) -> Result<Vec<i64>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, i64>("SELECT id FROM users ORDER BY id")
            .fetch_all(executor)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn new_user(username: &str, role: Role) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role,
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("member".parse::<Role>(), Ok(Role::Member));
        assert_eq!(
            "owner".parse::<Role>(),
            Err(UnknownRole("owner".to_string()))
        );
        assert!("Admin".parse::<Role>().is_err());
        assert_eq!(Role::Member.to_string(), "member");
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            username: "ada".into(),
            password_hash: "$2b$10$secret".into(),
            role: Role::Admin,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "admin");
    }

    #[actix_rt::test]
    async fn test_create_and_find_by_username() {
        let pool = db::connect_in_memory().await.unwrap();

        let created = User::create(&pool, new_user("grace", Role::Member))
            .await
            .unwrap();
        assert_eq!(created.username, "grace");
        assert_eq!(created.role, Role::Member);

        let found = User::find_by_username(&pool, "grace").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "not-a-real-hash");

        assert!(User::find_by_username(&pool, "nobody")
            .await
            .unwrap()
            .is_none());
    }

    #[actix_rt::test]
    async fn test_duplicate_username_hits_unique_constraint() {
        let pool = db::connect_in_memory().await.unwrap();

        User::create(&pool, new_user("linus", Role::Admin))
            .await
            .unwrap();
        let err = User::create(&pool, new_user("linus", Role::Member))
            .await
            .unwrap_err();

        let db_error = err.as_database_error().expect("expected a database error");
        assert!(db_error.is_unique_violation());
    }

    #[actix_rt::test]
    async fn test_all_ids() {
        let pool = db::connect_in_memory().await.unwrap();
        assert!(User::all_ids(&pool).await.unwrap().is_empty());

        let a = User::create(&pool, new_user("alpha", Role::Admin)).await.unwrap();
        let b = User::create(&pool, new_user("beta", Role::Member)).await.unwrap();

        assert_eq!(User::all_ids(&pool).await.unwrap(), vec![a.id, b.id]);
    }
}
