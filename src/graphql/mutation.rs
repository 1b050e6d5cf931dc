// SPDX-License-Identifier: MIT

//! Mutation root.
//!
//! Operations that touch two documents (team join, role assignment,
//! cycle-list append) are two independent writes with no transaction,
//! matching what the managed database is actually asked to do; a crash
//! between the writes leaves a partially applied state.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::graphql::query::verified_user;
use crate::graphql::scalars::Url;
use crate::graphql::types::{Cycle, Team, User};
use crate::ident;
use crate::models::{CycleRecord, LoginState, Role, TeamRecord};
use crate::origin::Origin;
use crate::services::LineClient;
use async_graphql::{Context, Object};
use chrono::Utc;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Get the URL to sign up or log in with. Assign it to
    /// `location.href` to reach the LINE authorization screen.
    async fn get_line_log_in_url(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Path to come back to after logging in")] path: String,
    ) -> async_graphql::Result<Url> {
        let db = ctx.data::<FirestoreDb>()?;
        let line = ctx.data::<LineClient>()?;
        // The requesting origin is injected per request from the Origin
        // header; absent means a direct (released) client.
        let origin = ctx
            .data_opt::<Origin>()
            .cloned()
            .unwrap_or(Origin::Release);

        let token = ident::generate_id()?;
        db.create_login_state(&LoginState {
            token: token.clone(),
            path,
            origin,
            created_at: Utc::now(),
        })
        .await?;

        tracing::info!(state = %token, "Log-in state issued");
        Ok(Url(line.authorize_url(&token)))
    }

    /// Register a team with the calling user as its manager
    async fn create_team_and_set_manager_role(
        &self,
        ctx: &Context<'_>,
        access_token: String,
        team_name: String,
    ) -> async_graphql::Result<Team> {
        let db = ctx.data::<FirestoreDb>()?;
        let mut user = verified_user(db, &access_token).await?;

        let team = TeamRecord {
            id: ident::generate_id()?,
            name: team_name,
            goal: String::new(),
            information: String::new(),
            created_at: Utc::now(),
            manager_id: user.id.clone(),
            player_ids: Vec::new(),
        };
        db.upsert_team(&team).await?;

        user.role = Some(Role::Manager);
        user.team_id = Some(team.id.clone());
        db.upsert_user(&user).await?;

        tracing::info!(team_id = %team.id, manager_id = %user.id, "Team created");
        Ok(Team::from_record(team))
    }

    /// Join a team as a player
    async fn join_team_and_set_player_role(
        &self,
        ctx: &Context<'_>,
        access_token: String,
        team_id: String,
    ) -> async_graphql::Result<Team> {
        let db = ctx.data::<FirestoreDb>()?;
        let mut user = verified_user(db, &access_token).await?;

        let mut team = db
            .get_team(&team_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("team ({})", team_id)))?;

        // Union append: joining twice leaves a single entry.
        if !team.player_ids.contains(&user.id) {
            team.player_ids.push(user.id.clone());
        }
        db.upsert_team(&team).await?;

        user.role = Some(Role::Player);
        user.team_id = Some(team.id.clone());
        db.upsert_user(&user).await?;

        tracing::info!(team_id = %team.id, player_id = %user.id, "Player joined team");
        Ok(Team::from_record(team))
    }

    /// Change the calling user's personal or coaching goal
    async fn update_personal_goal(
        &self,
        ctx: &Context<'_>,
        access_token: String,
        goal: String,
    ) -> async_graphql::Result<User> {
        let db = ctx.data::<FirestoreDb>()?;
        let mut user = verified_user(db, &access_token).await?;

        user.goal = goal;
        db.upsert_user(&user).await?;
        Ok(User::from_record(user))
    }

    /// Change the team goal. The caller must belong to the team.
    async fn update_team_goal(
        &self,
        ctx: &Context<'_>,
        access_token: String,
        goal: String,
    ) -> async_graphql::Result<Team> {
        let db = ctx.data::<FirestoreDb>()?;
        let user = verified_user(db, &access_token).await?;
        let mut team = users_team(db, &user).await?;

        team.goal = goal;
        db.upsert_team(&team).await?;
        Ok(Team::from_record(team))
    }

    /// Change the team's shared information. The caller must belong to
    /// the team.
    async fn update_team_information(
        &self,
        ctx: &Context<'_>,
        access_token: String,
        information: String,
    ) -> async_graphql::Result<Team> {
        let db = ctx.data::<FirestoreDb>()?;
        let user = verified_user(db, &access_token).await?;
        let mut team = users_team(db, &user).await?;

        team.information = information;
        db.upsert_team(&team).await?;
        Ok(Team::from_record(team))
    }

    /// Create a new cycle owned by the calling user
    async fn create_cycle(
        &self,
        ctx: &Context<'_>,
        access_token: String,
        plan: String,
        #[graphql(name = "do")] do_: String,
        check: String,
        act: String,
    ) -> async_graphql::Result<Cycle> {
        let db = ctx.data::<FirestoreDb>()?;
        let mut user = verified_user(db, &access_token).await?;

        let now = Utc::now();
        let cycle = CycleRecord {
            id: ident::generate_id()?,
            plan,
            do_,
            check,
            act,
            created_at: now,
            updated_at: now,
        };
        db.upsert_cycle(&cycle).await?;

        // Ownership link is append-only; cycles are never detached.
        if !user.cycle_ids.contains(&cycle.id) {
            user.cycle_ids.push(cycle.id.clone());
        }
        db.upsert_user(&user).await?;

        tracing::info!(cycle_id = %cycle.id, user_id = %user.id, "Cycle created");
        Ok(Cycle::from_record(cycle))
    }

    /// Overwrite a cycle's four fields and refresh its update time
    async fn update_cycle(
        &self,
        ctx: &Context<'_>,
        access_token: String,
        cycle_id: String,
        plan: String,
        #[graphql(name = "do")] do_: String,
        check: String,
        act: String,
    ) -> async_graphql::Result<Cycle> {
        let db = ctx.data::<FirestoreDb>()?;
        let user = verified_user(db, &access_token).await?;

        if !user.cycle_ids.contains(&cycle_id) {
            return Err(AppError::InvalidInput(format!(
                "cycle ({}) is not owned by the calling user",
                cycle_id
            ))
            .into());
        }

        let mut cycle = db
            .get_cycle(&cycle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("cycle ({})", cycle_id)))?;

        cycle.plan = plan;
        cycle.do_ = do_;
        cycle.check = check;
        cycle.act = act;
        cycle.updated_at = Utc::now();
        db.upsert_cycle(&cycle).await?;

        Ok(Cycle::from_record(cycle))
    }
}

/// Fetch the team the user belongs to, or fail if they have none.
async fn users_team(
    db: &FirestoreDb,
    user: &crate::models::UserRecord,
) -> Result<TeamRecord, AppError> {
    let team_id = user
        .team_id
        .as_ref()
        .ok_or_else(|| AppError::InvalidInput("the user does not belong to a team".to_string()))?;
    db.get_team(team_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("team ({})", team_id)))
}
