// SPDX-License-Identifier: MIT

//! Schema tests that run entirely offline.
//!
//! The mock database errors on any read, so these exercise the parts of
//! the schema that must not touch storage.

mod common;
use common::{test_db_offline, test_schema};

#[tokio::test]
async fn test_hello() {
    let schema = test_schema(test_db_offline());

    let response = schema.execute("{ hello }").await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(data["hello"], "やあ、TEAMeのAPIサーバーだよ");
}

#[tokio::test]
async fn test_user_private_rejects_malformed_token() {
    let schema = test_schema(test_db_offline());

    // Not hex, so it fails before any database lookup.
    let response = schema
        .execute(r#"{ userPrivate(accessToken: "definitely-not-hex") { id } }"#)
        .await;

    assert_eq!(response.errors.len(), 1);
    assert!(
        response.errors[0].message.contains("accessToken"),
        "unexpected message: {}",
        response.errors[0].message
    );
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let schema = test_schema(test_db_offline());

    let response = schema.execute("{ goodbye }").await;
    assert!(!response.errors.is_empty());
}

#[tokio::test]
async fn test_role_enum_values_are_lowercase() {
    let schema = test_schema(test_db_offline());

    let response = schema
        .execute(r#"{ __type(name: "Role") { enumValues { name } } }"#)
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    let names: Vec<_> = data["__type"]["enumValues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["manager", "player"]);
}

#[tokio::test]
async fn test_cycle_field_names_match_pdca() {
    let schema = test_schema(test_db_offline());

    let response = schema
        .execute(r#"{ __type(name: "Cycle") { fields { name } } }"#)
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    let names: Vec<_> = data["__type"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap().to_string())
        .collect();
    for expected in ["id", "plan", "do", "check", "act", "createdAt", "updateAt"] {
        assert!(names.contains(&expected.to_string()), "missing {}", expected);
    }
}
