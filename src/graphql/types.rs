// SPDX-License-Identifier: MIT

//! GraphQL object types.
//!
//! `User`, `Team` and `Cycle` are nodes over lazily fetched documents: a
//! node carries its ID, whatever fields the caller already knew, and a
//! [`Lazy`] cell holding the full record once the first unknown field is
//! resolved. Relationship fields resolve to child reference nodes, so a
//! deep query costs one document read per distinct entity touched.
//!
//! Caller-known relationship values always win over a later fetch: a node
//! built with `team = {id}` keeps that subgraph even after an unrelated
//! scalar forces the full user document to be read.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::graphql::lazy::Lazy;
use crate::graphql::scalars::{DateTimeUtc, FileHash};
use crate::models::{CycleRecord, Role, TeamRecord, UserRecord};
use async_graphql::{Context, Object};
use chrono::{DateTime, Utc};

// ─── User ────────────────────────────────────────────────────────

pub struct User {
    id: String,
    known: KnownUser,
    record: Lazy<UserRecord>,
}

/// Fields the caller already knew when constructing the node. Anything
/// left `None` is served from the fetched record.
#[derive(Default)]
pub struct KnownUser {
    pub name: Option<String>,
    pub image_file_hash: Option<String>,
    pub goal: Option<String>,
    pub role: Option<Option<Role>>,
    pub created_at: Option<DateTime<Utc>>,
    pub team_id: Option<Option<String>>,
    pub cycle_ids: Option<Vec<String>>,
}

impl User {
    /// A node carrying only the identifying key.
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            known: KnownUser::default(),
            record: Lazy::empty(),
        }
    }

    /// A node with some caller-known fields.
    pub fn with_known(id: impl Into<String>, known: KnownUser) -> Self {
        Self {
            id: id.into(),
            known,
            record: Lazy::empty(),
        }
    }

    /// A node over an already-fetched record; no further reads happen.
    pub fn from_record(record: UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            known: KnownUser::default(),
            record: Lazy::filled(record),
        }
    }

    async fn record(&self, db: &FirestoreDb) -> Result<&UserRecord, AppError> {
        self.record
            .get_or_fetch(|| async {
                db.get_user(&self.id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("user ({})", self.id)))
            })
            .await
    }

    pub async fn name_value(&self, db: &FirestoreDb) -> Result<String, AppError> {
        if let Some(name) = &self.known.name {
            return Ok(name.clone());
        }
        Ok(self.record(db).await?.name.clone())
    }

    pub async fn image_file_hash_value(&self, db: &FirestoreDb) -> Result<String, AppError> {
        if let Some(hash) = &self.known.image_file_hash {
            return Ok(hash.clone());
        }
        Ok(self.record(db).await?.image_file_hash.clone())
    }

    pub async fn goal_value(&self, db: &FirestoreDb) -> Result<String, AppError> {
        if let Some(goal) = &self.known.goal {
            return Ok(goal.clone());
        }
        Ok(self.record(db).await?.goal.clone())
    }

    pub async fn role_value(&self, db: &FirestoreDb) -> Result<Option<Role>, AppError> {
        if let Some(role) = self.known.role {
            return Ok(role);
        }
        Ok(self.record(db).await?.role)
    }

    pub async fn created_at_value(&self, db: &FirestoreDb) -> Result<DateTime<Utc>, AppError> {
        if let Some(created_at) = self.known.created_at {
            return Ok(created_at);
        }
        Ok(self.record(db).await?.created_at)
    }

    /// The user's team as a child reference. A caller-known value is
    /// preserved and never overwritten by the fetch.
    pub async fn team_value(&self, db: &FirestoreDb) -> Result<Option<Team>, AppError> {
        if let Some(team_id) = &self.known.team_id {
            return Ok(team_id.as_deref().map(Team::reference));
        }
        Ok(self.record(db).await?.team_id.as_deref().map(Team::reference))
    }

    pub async fn cycle_list_value(&self, db: &FirestoreDb) -> Result<Vec<Cycle>, AppError> {
        if let Some(cycle_ids) = &self.known.cycle_ids {
            return Ok(cycle_ids.iter().map(Cycle::reference).collect());
        }
        let record = self.record(db).await?;
        Ok(record.cycle_ids.iter().map(Cycle::reference).collect())
    }
}

#[Object]
impl User {
    /// ID identifying the user
    async fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    async fn name(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        Ok(self.name_value(ctx.data::<FirestoreDb>()?).await?)
    }

    /// Content hash of the avatar image
    async fn image_file_hash(&self, ctx: &Context<'_>) -> async_graphql::Result<FileHash> {
        Ok(FileHash(
            self.image_file_hash_value(ctx.data::<FirestoreDb>()?).await?,
        ))
    }

    /// Personal goal, or coaching goal for a manager
    async fn goal(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        Ok(self.goal_value(ctx.data::<FirestoreDb>()?).await?)
    }

    /// Role within the team; null until the user creates or joins one
    async fn role(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Role>> {
        Ok(self.role_value(ctx.data::<FirestoreDb>()?).await?)
    }

    /// When the account was created
    async fn created_at(&self, ctx: &Context<'_>) -> async_graphql::Result<DateTimeUtc> {
        Ok(DateTimeUtc(
            self.created_at_value(ctx.data::<FirestoreDb>()?).await?,
        ))
    }

    /// The team the user belongs to, if any
    async fn team(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Team>> {
        Ok(self.team_value(ctx.data::<FirestoreDb>()?).await?)
    }

    /// Cycles the user has created
    async fn cycle_list(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Cycle>> {
        Ok(self.cycle_list_value(ctx.data::<FirestoreDb>()?).await?)
    }
}

// ─── Team ────────────────────────────────────────────────────────

pub struct Team {
    id: String,
    known: KnownTeam,
    record: Lazy<TeamRecord>,
}

#[derive(Default)]
pub struct KnownTeam {
    pub name: Option<String>,
    pub goal: Option<String>,
    pub information: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub manager_id: Option<String>,
    pub player_ids: Option<Vec<String>>,
}

impl Team {
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            known: KnownTeam::default(),
            record: Lazy::empty(),
        }
    }

    pub fn with_known(id: impl Into<String>, known: KnownTeam) -> Self {
        Self {
            id: id.into(),
            known,
            record: Lazy::empty(),
        }
    }

    pub fn from_record(record: TeamRecord) -> Self {
        Self {
            id: record.id.clone(),
            known: KnownTeam::default(),
            record: Lazy::filled(record),
        }
    }

    async fn record(&self, db: &FirestoreDb) -> Result<&TeamRecord, AppError> {
        self.record
            .get_or_fetch(|| async {
                db.get_team(&self.id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("team ({})", self.id)))
            })
            .await
    }

    pub async fn name_value(&self, db: &FirestoreDb) -> Result<String, AppError> {
        if let Some(name) = &self.known.name {
            return Ok(name.clone());
        }
        Ok(self.record(db).await?.name.clone())
    }

    pub async fn goal_value(&self, db: &FirestoreDb) -> Result<String, AppError> {
        if let Some(goal) = &self.known.goal {
            return Ok(goal.clone());
        }
        Ok(self.record(db).await?.goal.clone())
    }

    pub async fn information_value(&self, db: &FirestoreDb) -> Result<String, AppError> {
        if let Some(information) = &self.known.information {
            return Ok(information.clone());
        }
        Ok(self.record(db).await?.information.clone())
    }

    pub async fn created_at_value(&self, db: &FirestoreDb) -> Result<DateTime<Utc>, AppError> {
        if let Some(created_at) = self.known.created_at {
            return Ok(created_at);
        }
        Ok(self.record(db).await?.created_at)
    }

    pub async fn manager_value(&self, db: &FirestoreDb) -> Result<User, AppError> {
        if let Some(manager_id) = &self.known.manager_id {
            return Ok(User::reference(manager_id));
        }
        Ok(User::reference(&self.record(db).await?.manager_id))
    }

    pub async fn player_list_value(&self, db: &FirestoreDb) -> Result<Vec<User>, AppError> {
        if let Some(player_ids) = &self.known.player_ids {
            return Ok(player_ids.iter().map(User::reference).collect());
        }
        let record = self.record(db).await?;
        Ok(record.player_ids.iter().map(User::reference).collect())
    }
}

#[Object]
impl Team {
    /// ID identifying the team
    async fn id(&self) -> &str {
        &self.id
    }

    /// Team name
    async fn name(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        Ok(self.name_value(ctx.data::<FirestoreDb>()?).await?)
    }

    /// Team goal
    async fn goal(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        Ok(self.goal_value(ctx.data::<FirestoreDb>()?).await?)
    }

    /// Shared information for the whole team
    async fn information(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        Ok(self.information_value(ctx.data::<FirestoreDb>()?).await?)
    }

    /// When the team was created
    async fn created_at(&self, ctx: &Context<'_>) -> async_graphql::Result<DateTimeUtc> {
        Ok(DateTimeUtc(
            self.created_at_value(ctx.data::<FirestoreDb>()?).await?,
        ))
    }

    /// The managing user
    async fn manager(&self, ctx: &Context<'_>) -> async_graphql::Result<User> {
        Ok(self.manager_value(ctx.data::<FirestoreDb>()?).await?)
    }

    /// The players on the team
    async fn player_list(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<User>> {
        Ok(self.player_list_value(ctx.data::<FirestoreDb>()?).await?)
    }
}

// ─── Cycle ───────────────────────────────────────────────────────

pub struct Cycle {
    id: String,
    record: Lazy<CycleRecord>,
}

impl Cycle {
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            record: Lazy::empty(),
        }
    }

    pub fn from_record(record: CycleRecord) -> Self {
        Self {
            id: record.id.clone(),
            record: Lazy::filled(record),
        }
    }

    async fn record(&self, db: &FirestoreDb) -> Result<&CycleRecord, AppError> {
        self.record
            .get_or_fetch(|| async {
                db.get_cycle(&self.id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("cycle ({})", self.id)))
            })
            .await
    }
}

/// One PDCA cycle.
#[Object]
impl Cycle {
    /// ID identifying the cycle
    async fn id(&self) -> &str {
        &self.id
    }

    async fn plan(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        Ok(self.record(ctx.data::<FirestoreDb>()?).await?.plan.clone())
    }

    #[graphql(name = "do")]
    async fn do_(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        Ok(self.record(ctx.data::<FirestoreDb>()?).await?.do_.clone())
    }

    async fn check(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        Ok(self.record(ctx.data::<FirestoreDb>()?).await?.check.clone())
    }

    async fn act(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        Ok(self.record(ctx.data::<FirestoreDb>()?).await?.act.clone())
    }

    async fn created_at(&self, ctx: &Context<'_>) -> async_graphql::Result<DateTimeUtc> {
        Ok(DateTimeUtc(
            self.record(ctx.data::<FirestoreDb>()?).await?.created_at,
        ))
    }

    #[graphql(name = "updateAt")]
    async fn update_at(&self, ctx: &Context<'_>) -> async_graphql::Result<DateTimeUtc> {
        Ok(DateTimeUtc(
            self.record(ctx.data::<FirestoreDb>()?).await?.updated_at,
        ))
    }
}
