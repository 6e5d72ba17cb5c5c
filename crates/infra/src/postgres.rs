//! Postgres-backed read-only store.
//!
//! Point lookups against the platform tables on a read replica. Every query
//! is `fetch_optional`: zero rows is "not found", more than one row cannot
//! happen because each filter hits a unique key.

use std::sync::Arc;

use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::instrument;

use studio_auth::{MemberRow, ReadOnlyDataStore, StoreError, UserRow};
use studio_core::{GotrueId, OrgSlug, OrganizationId, ProjectRef, UserId};

pub struct PostgresReadStore {
    pool: Arc<PgPool>,
}

impl PostgresReadStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Lazily connecting pool; no connection is made until the first lookup.
    pub fn connect_lazy(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect_lazy(database_url)
            .map_err(|e| StoreError::Unavailable(format!("invalid database url: {e}")))?;
        Ok(Self::new(pool))
    }
}

#[async_trait::async_trait]
impl ReadOnlyDataStore for PostgresReadStore {
    #[instrument(skip_all, fields(gotrue_id = %gotrue_id), err)]
    async fn find_user_by_gotrue_id(&self, gotrue_id: &GotrueId) -> Result<Option<UserRow>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, auth0_id, primary_email, username, first_name, last_name, mobile, is_alpha_user
            FROM users
            WHERE gotrue_id = $1
            "#,
        )
        .bind(gotrue_id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_user_by_gotrue_id", e))?;

        row.map(|r| user_row(&r))
            .transpose()
            .map_err(|e| map_sqlx_error("find_user_by_gotrue_id", e))
    }

    #[instrument(skip_all, fields(slug = %slug), err)]
    async fn find_organization_by_slug(&self, slug: &OrgSlug) -> Result<Option<OrganizationId>, StoreError> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM organizations WHERE slug = $1")
            .bind(slug.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_organization_by_slug", e))?;
        Ok(id.map(OrganizationId::new))
    }

    #[instrument(skip_all, fields(project_ref = %project_ref), err)]
    async fn find_project_organization(
        &self,
        project_ref: &ProjectRef,
    ) -> Result<Option<OrganizationId>, StoreError> {
        let id: Option<i64> = sqlx::query_scalar("SELECT organization_id FROM projects WHERE ref = $1")
            .bind(project_ref.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_project_organization", e))?;
        Ok(id.map(OrganizationId::new))
    }

    #[instrument(skip_all, fields(organization_id = %organization_id, user_id = %user_id), err)]
    async fn find_membership(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<Option<MemberRow>, StoreError> {
        let id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM members WHERE organization_id = $1 AND user_id = $2")
                .bind(organization_id.get())
                .bind(user_id.get())
                .fetch_optional(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("find_membership", e))?;
        Ok(id.map(|id| MemberRow { id }))
    }
}

fn user_row(row: &PgRow) -> Result<UserRow, sqlx::Error> {
    Ok(UserRow {
        id: UserId::new(row.try_get("id")?),
        auth0_id: row.try_get("auth0_id")?,
        primary_email: row.try_get("primary_email")?,
        username: row.try_get("username")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        mobile: row.try_get("mobile")?,
        is_alpha_user: row.try_get::<Option<bool>, _>("is_alpha_user")?.unwrap_or(false),
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(format!("{operation}: {err}"))
        }
        sqlx::Error::Database(db_err) => {
            StoreError::Query(format!("database error in {}: {}", operation, db_err.message()))
        }
        other => StoreError::Query(format!("{operation}: {other}")),
    }
}
