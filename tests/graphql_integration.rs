// SPDX-License-Identifier: MIT

//! End-to-end GraphQL tests against the Firestore emulator.
//!
//! Run with FIRESTORE_EMULATOR_HOST set; skipped otherwise. The emulator
//! provides a clean state for each test run.

use chrono::Utc;
use teame_api::ident;
use teame_api::models::UserRecord;
use teame_api::origin::Origin;

mod common;
use common::{test_db, test_schema};

/// Seed a logged-in user, returning the record and a valid access token.
async fn seed_user(db: &teame_api::db::FirestoreDb, name: &str) -> (UserRecord, String) {
    let access_token = ident::generate_access_token().unwrap();
    let user = UserRecord {
        id: ident::generate_id().unwrap(),
        name: name.to_string(),
        goal: String::new(),
        line_user_id: format!("U{}", ident::generate_id().unwrap()),
        image_file_hash: ident::file_hash(name.as_bytes(), "image/png"),
        access_token_hash: ident::hash_access_token(&access_token).unwrap(),
        created_at: Utc::now(),
        role: None,
        team_id: None,
        cycle_ids: Vec::new(),
    };
    db.upsert_user(&user).await.unwrap();
    (user, access_token)
}

#[tokio::test]
async fn test_create_team_appears_in_all_team() {
    require_emulator!();

    let db = test_db().await;
    let schema = test_schema(db.clone());
    let (manager, token) = seed_user(&db, "Coach").await;

    let response = schema
        .execute(format!(
            r#"mutation {{
                createTeamAndSetManagerRole(accessToken: "{}", teamName: "Hawks") {{
                    id
                    name
                    manager {{ id }}
                    playerList {{ id }}
                }}
            }}"#,
            token
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    let created = &data["createTeamAndSetManagerRole"];
    assert_eq!(created["name"], "Hawks");
    assert_eq!(created["manager"]["id"], manager.id.as_str());
    assert_eq!(created["playerList"].as_array().unwrap().len(), 0);

    // The creator's own record now carries the role and team link.
    let updated = db.get_user(&manager.id).await.unwrap().unwrap();
    assert_eq!(updated.team_id.as_deref(), created["id"].as_str());

    // And the team is visible through allTeam.
    let response = schema
        .execute("{ allTeam { id name manager { id } } }")
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let found = data["allTeam"]
        .as_array()
        .unwrap()
        .iter()
        .any(|team| team["name"] == "Hawks" && team["manager"]["id"] == manager.id.as_str());
    assert!(found, "created team missing from allTeam");
}

#[tokio::test]
async fn test_join_team_links_both_documents() {
    require_emulator!();

    let db = test_db().await;
    let schema = test_schema(db.clone());
    let (_manager, manager_token) = seed_user(&db, "Coach").await;
    let (player, player_token) = seed_user(&db, "Player One").await;

    let response = schema
        .execute(format!(
            r#"mutation {{
                createTeamAndSetManagerRole(accessToken: "{}", teamName: "Eagles") {{ id }}
            }}"#,
            manager_token
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let team_id = data["createTeamAndSetManagerRole"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = schema
        .execute(format!(
            r#"mutation {{
                joinTeamAndSetPlayerRole(accessToken: "{}", teamId: "{}") {{
                    playerList {{ id }}
                }}
            }}"#,
            player_token, team_id
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    // The team lists exactly the one player...
    let response = schema
        .execute(format!(
            r#"{{ team(id: "{}") {{ playerList {{ id name role }} }} }}"#,
            team_id
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let players = data["team"]["playerList"].as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["id"], player.id.as_str());
    assert_eq!(players[0]["role"], "player");

    // ...and the player's own view links back to the team.
    let response = schema
        .execute(format!(
            r#"{{ userPrivate(accessToken: "{}") {{ team {{ id }} }} }}"#,
            player_token
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["userPrivate"]["team"]["id"], team_id.as_str());
}

#[tokio::test]
async fn test_joining_twice_keeps_one_entry() {
    require_emulator!();

    let db = test_db().await;
    let schema = test_schema(db.clone());
    let (_manager, manager_token) = seed_user(&db, "Coach").await;
    let (_player, player_token) = seed_user(&db, "Player").await;

    let response = schema
        .execute(format!(
            r#"mutation {{
                createTeamAndSetManagerRole(accessToken: "{}", teamName: "Owls") {{ id }}
            }}"#,
            manager_token
        ))
        .await;
    let data = response.data.into_json().unwrap();
    let team_id = data["createTeamAndSetManagerRole"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    for _ in 0..2 {
        let response = schema
            .execute(format!(
                r#"mutation {{
                    joinTeamAndSetPlayerRole(accessToken: "{}", teamId: "{}") {{ id }}
                }}"#,
                player_token, team_id
            ))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
    }

    let team = db.get_team(&team_id).await.unwrap().unwrap();
    assert_eq!(team.player_ids.len(), 1);
}

#[tokio::test]
async fn test_log_in_url_persists_state() {
    require_emulator!();

    let db = test_db().await;
    let schema = test_schema(db.clone());

    let request = async_graphql::Request::new(
        r#"mutation { getLineLogInUrl(path: "/dashboard") }"#,
    )
    .data(Origin::Debug { port: 2520 });

    let response = schema.execute(request).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    let url = data["getLineLogInUrl"].as_str().unwrap().to_string();
    assert!(url.starts_with("https://access.line.me/oauth2/v2.1/authorize?"));
    assert!(url.contains("scope=profile+openid"));

    // The state parameter must match a persisted, redeemable state.
    let state = url
        .split('&')
        .find_map(|pair| pair.strip_prefix("state="))
        .expect("authorize URL missing state parameter")
        .to_string();

    let login_state = db.take_login_state(&state).await.unwrap().unwrap();
    assert_eq!(login_state.path, "/dashboard");
    assert_eq!(login_state.origin, Origin::Debug { port: 2520 });
}

#[tokio::test]
async fn test_cycle_create_update_and_ownership() {
    require_emulator!();

    let db = test_db().await;
    let schema = test_schema(db.clone());
    let (owner, owner_token) = seed_user(&db, "Owner").await;
    let (_other, other_token) = seed_user(&db, "Other").await;

    let response = schema
        .execute(format!(
            r#"mutation {{
                createCycle(accessToken: "{}", plan: "run drills", do: "ran them",
                            check: "slow starts", act: "earlier warmup") {{
                    id plan do check act
                }}
            }}"#,
            owner_token
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let cycle_id = data["createCycle"]["id"].as_str().unwrap().to_string();
    assert_eq!(data["createCycle"]["do"], "ran them");

    // The owner's cycle list picked up the new cycle.
    let owner_record = db.get_user(&owner.id).await.unwrap().unwrap();
    assert!(owner_record.cycle_ids.contains(&cycle_id));

    // Someone else cannot update it.
    let response = schema
        .execute(format!(
            r#"mutation {{
                updateCycle(accessToken: "{}", cycleId: "{}", plan: "p", do: "d",
                            check: "c", act: "a") {{ id }}
            }}"#,
            other_token, cycle_id
        ))
        .await;
    assert!(!response.errors.is_empty());

    // The owner can, and the update overwrites all four fields.
    let response = schema
        .execute(format!(
            r#"mutation {{
                updateCycle(accessToken: "{}", cycleId: "{}", plan: "new plan", do: "new do",
                            check: "new check", act: "new act") {{ plan do check act }}
            }}"#,
            owner_token, cycle_id
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["updateCycle"]["plan"], "new plan");
    assert_eq!(data["updateCycle"]["act"], "new act");

    let stored = db.get_cycle(&cycle_id).await.unwrap().unwrap();
    assert!(stored.updated_at >= stored.created_at);
}

#[tokio::test]
async fn test_stale_access_token_stops_working() {
    require_emulator!();

    let db = test_db().await;
    let schema = test_schema(db.clone());
    let (mut user, old_token) = seed_user(&db, "Rotating").await;

    // A new log-in replaces the stored hash wholesale.
    let new_token = ident::generate_access_token().unwrap();
    user.access_token_hash = ident::hash_access_token(&new_token).unwrap();
    db.upsert_user(&user).await.unwrap();

    let response = schema
        .execute(format!(
            r#"{{ userPrivate(accessToken: "{}") {{ id }} }}"#,
            old_token
        ))
        .await;
    assert!(!response.errors.is_empty(), "stale token still accepted");

    let response = schema
        .execute(format!(
            r#"{{ userPrivate(accessToken: "{}") {{ id }} }}"#,
            new_token
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    require_emulator!();

    let db = test_db().await;
    let schema = test_schema(db);

    let response = schema
        .execute(r#"{ user(userId: "does-not-exist") { name } }"#)
        .await;
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("not found"));
}
