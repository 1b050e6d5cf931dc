// SPDX-License-Identifier: MIT

//! Query root: reads only, no side effects.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::graphql::types::{Cycle, Team, User};
use crate::ident;
use async_graphql::{Context, Object};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Say hello to TEAMe
    async fn hello(&self) -> &str {
        "やあ、TEAMeのAPIサーバーだよ"
    }

    /// The calling user's own data, looked up by access token
    async fn user_private(
        &self,
        ctx: &Context<'_>,
        access_token: String,
    ) -> async_graphql::Result<User> {
        let db = ctx.data::<FirestoreDb>()?;
        let record = verified_user(db, &access_token).await?;
        Ok(User::from_record(record))
    }

    /// A user's public data
    async fn user(&self, ctx: &Context<'_>, user_id: String) -> async_graphql::Result<User> {
        let db = ctx.data::<FirestoreDb>()?;
        let record = db
            .get_user(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user ({})", user_id)))?;
        Ok(User::from_record(record))
    }

    /// Every team
    async fn all_team(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Team>> {
        let db = ctx.data::<FirestoreDb>()?;
        Ok(db
            .get_all_teams()
            .await?
            .into_iter()
            .map(Team::from_record)
            .collect())
    }

    /// A team's data
    async fn team(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<Team> {
        let db = ctx.data::<FirestoreDb>()?;
        let record = db
            .get_team(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("team ({})", id)))?;
        Ok(Team::from_record(record))
    }

    /// A cycle's data
    async fn cycle(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<Cycle> {
        let db = ctx.data::<FirestoreDb>()?;
        let record = db
            .get_cycle(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("cycle ({})", id)))?;
        Ok(Cycle::from_record(record))
    }
}

/// Resolve an access token to its user, or fail with `InvalidCredential`.
///
/// Only the hash of the most recently issued token is stored, so an older
/// token simply matches nothing.
pub(crate) async fn verified_user(
    db: &FirestoreDb,
    access_token: &str,
) -> Result<crate::models::UserRecord, AppError> {
    let hash = ident::hash_access_token(access_token)?;
    db.find_user_by_token_hash(&hash)
        .await?
        .ok_or(AppError::InvalidCredential)
}
