/**
 * PostgreSQL Store
 *
 * sqlx-backed implementation of both repositories. The schema lives in
 * `migrations/`; email uniqueness is a unique index on `users.email`, and
 * a violation of it is reported as `RepositoryError::Conflict`.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::backend::auth::users::{NewUser, Subscription, User};
use crate::backend::contacts::types::{Contact, ContactPatch, NewContact};
use crate::backend::store::{ContactRepository, RepositoryError, UserRepository, EMAIL_IN_USE};

const USER_COLUMNS: &str = "id, email, password_hash, subscription, avatar_url, verified, \
     verification_code, access_token, created_at, updated_at";

const CONTACT_COLUMNS: &str = "id, name, email, phone, favorite, owner_id, created_at, updated_at";

/// Record store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::conflict("Record already exists")
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Connection {
                    message: err.to_string(),
                }
            }
            _ => Self::query(err.to_string()),
        }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    let subscription: String = row.try_get("subscription")?;
    let subscription = subscription
        .parse::<Subscription>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        subscription,
        avatar_url: row.try_get("avatar_url")?,
        verified: row.try_get("verified")?,
        verification_code: row.try_get("verification_code")?,
        access_token: row.try_get("access_token")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn contact_from_row(row: &PgRow) -> Result<Contact, sqlx::Error> {
    Ok(Contact {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        favorite: row.try_get("favorite")?,
        owner: row.try_get("owner_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn optional_user(row: Option<PgRow>) -> Result<Option<User>, RepositoryError> {
    Ok(row.as_ref().map(user_from_row).transpose()?)
}

fn optional_contact(row: Option<PgRow>) -> Result<Option<Contact>, RepositoryError> {
    Ok(row.as_ref().map(contact_from_row).transpose()?)
}

#[async_trait]
impl UserRepository for PgStore {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (id, email, password_hash, subscription, avatar_url, verified,
                               verification_code, access_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, $6, NULL, $7, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.subscription.as_str())
        .bind(&user.avatar_url)
        .bind(&user.verification_code)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match RepositoryError::from(e) {
            RepositoryError::Conflict { .. } => RepositoryError::conflict(EMAIL_IN_USE),
            other => other,
        })?;

        Ok(user_from_row(&row)?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        optional_user(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        optional_user(row)
    }

    async fn verify_by_code(&self, code: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET verified = TRUE, verification_code = NULL, updated_at = $2
            WHERE verification_code = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(code)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        optional_user(row)
    }

    async fn set_access_token(
        &self,
        id: Uuid,
        token: Option<&str>,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET access_token = $1, updated_at = $2 WHERE id = $3")
            .bind(token)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_subscription(
        &self,
        id: Uuid,
        subscription: Subscription,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users SET subscription = $1, updated_at = $2
            WHERE id = $3
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(subscription.as_str())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        optional_user(row)
    }

    async fn set_avatar_url(&self, id: Uuid, url: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users SET avatar_url = $1, updated_at = $2
            WHERE id = $3
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(url)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        optional_user(row)
    }
}

#[async_trait]
impl ContactRepository for PgStore {
    async fn list(&self, owner: Option<Uuid>) -> Result<Vec<Contact>, RepositoryError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {CONTACT_COLUMNS} FROM contacts
            WHERE ($1::uuid IS NULL OR owner_id = $1)
            ORDER BY created_at
            "#
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        let contacts = rows
            .iter()
            .map(contact_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
    ) -> Result<Option<Contact>, RepositoryError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {CONTACT_COLUMNS} FROM contacts
            WHERE id = $1 AND ($2::uuid IS NULL OR owner_id = $2)
            "#
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        optional_contact(row)
    }

    async fn insert(&self, owner: Uuid, contact: NewContact) -> Result<Contact, RepositoryError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO contacts (id, name, email, phone, favorite, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(contact.favorite)
        .bind(owner)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(contact_from_row(&row)?)
    }

    async fn update(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        patch: ContactPatch,
    ) -> Result<Option<Contact>, RepositoryError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE contacts
            SET name = COALESCE($3, name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                favorite = COALESCE($6, favorite),
                updated_at = $7
            WHERE id = $1 AND ($2::uuid IS NULL OR owner_id = $2)
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.phone)
        .bind(patch.favorite)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        optional_contact(row)
    }

    async fn delete(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
    ) -> Result<Option<Contact>, RepositoryError> {
        let row = sqlx::query(&format!(
            r#"
            DELETE FROM contacts
            WHERE id = $1 AND ($2::uuid IS NULL OR owner_id = $2)
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        optional_contact(row)
    }
}
