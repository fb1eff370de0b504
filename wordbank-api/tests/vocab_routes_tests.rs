//! Router-Level Tests for the Vocabulary Endpoints

mod common;

use axum::http::StatusCode;
use proptest::prelude::*;
use serde_json::json;
use wordbank_core::{Procedure, SqlValue};
use wordbank_test_utils::{generators, status_row, vocab_id_row, vocab_row, ResultRow, StubGateway};

use common::{delete, get, post};

// ============================================================================
// POST /api/vocab
// ============================================================================

#[tokio::test]
async fn test_add_vocab_returns_new_id() {
    let stub = StubGateway::new().with_rows(Procedure::AddVocabulary, vec![vocab_id_row(11)]);

    let (status, body) = post(
        &stub,
        "/api/vocab",
        json!({"UserID": 7, "KnownWord": "house", "TargetWord": "Haus"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Vocabulary added", "vocabId": 11}));

    let call = stub.last_call().unwrap();
    assert_eq!(call.procedure(), Procedure::AddVocabulary);
    assert_eq!(call.param("userID"), Some(&SqlValue::Int(7)));
    assert_eq!(call.param("knownWord"), Some(&SqlValue::from("house")));
    assert_eq!(call.param("targetWord"), Some(&SqlValue::from("Haus")));
}

#[tokio::test]
async fn test_add_vocab_rejects_missing_user() {
    let stub = StubGateway::new();

    let (status, body) = post(
        &stub,
        "/api/vocab",
        json!({"KnownWord": "house", "TargetWord": "Haus"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User ID, KnownWord, and TargetWord are required.");
    assert_eq!(body["code"], "INVALID_RANGE");
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn test_add_vocab_mistyped_user_id_is_bad_request() {
    for user_id in [json!("seven"), json!(3_000_000_000_i64), json!(1.5)] {
        let stub = StubGateway::new();

        let (status, body) = post(
            &stub,
            "/api/vocab",
            json!({"UserID": user_id, "KnownWord": "house", "TargetWord": "Haus"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", user_id);
        assert_eq!(body["code"], "VALIDATION_FAILED", "{}", user_id);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
        assert_eq!(stub.call_count(), 0);
    }
}

#[tokio::test]
async fn test_add_vocab_without_content_type_is_bad_request() {
    let stub = StubGateway::new();

    let (status, body) = common::send_untyped(
        &stub,
        "/api/vocab",
        r#"{"UserID": 7, "KnownWord": "house", "TargetWord": "Haus"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn test_add_vocab_null_word_is_missing() {
    let stub = StubGateway::new();

    let (status, body) = post(
        &stub,
        "/api/vocab",
        json!({"UserID": 7, "KnownWord": null, "TargetWord": "Haus"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FIELD");
    assert_eq!(body["message"], "User ID, KnownWord, and TargetWord are required.");
}

#[tokio::test]
async fn test_add_vocab_without_row_fails() {
    let stub = StubGateway::new();

    let (status, body) = post(
        &stub,
        "/api/vocab",
        json!({"userId": 7, "knownWord": "house", "targetWord": "Haus"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "OPERATION_FAILED");
    assert_eq!(body["message"], "Failed to add vocabulary.");
    assert_eq!(stub.call_count(), 1);
}

// ============================================================================
// LISTINGS
// ============================================================================

#[tokio::test]
async fn test_list_all_preserves_database_order() {
    let stub = StubGateway::new().with_rows(
        Procedure::GetAllVocabulary,
        vec![
            vocab_row(9, "tree", "Baum", true),
            vocab_row(2, "house", "Haus", false),
        ],
    );

    let (status, body) = get(&stub, "/api/vocab/all/7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"ID": 9, "KnownWord": "tree", "TargetWord": "Baum", "Learnt": true},
            {"ID": 2, "KnownWord": "house", "TargetWord": "Haus", "Learnt": false},
        ])
    );
    assert_eq!(stub.last_call().unwrap().param("userID"), Some(&SqlValue::Int(7)));
}

#[tokio::test]
async fn test_list_all_empty_is_empty_array() {
    let stub = StubGateway::new();

    let (status, body) = get(&stub, "/api/vocab/all/7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_read_endpoints_pass_non_positive_ids_through() {
    let stub = StubGateway::new();

    let (status, _) = get(&stub, "/api/vocab/all/0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stub.last_call().unwrap().param("userID"), Some(&SqlValue::Int(0)));
}

#[tokio::test]
async fn test_known_and_unknown_use_distinct_procedures() {
    let stub = StubGateway::new()
        .with_rows(Procedure::GetKnownVocabulary, vec![vocab_row(1, "tree", "Baum", true)])
        .with_rows(Procedure::GetUnknownVocabulary, vec![vocab_row(2, "house", "Haus", false)]);

    let (known_status, known) = get(&stub, "/api/vocab/known/7").await;
    let (unknown_status, unknown) = get(&stub, "/api/vocab/unknown/7").await;

    assert_eq!(known_status, StatusCode::OK);
    assert_eq!(unknown_status, StatusCode::OK);
    assert_eq!(known[0]["Learnt"], true);
    assert_eq!(unknown[0]["Learnt"], false);
    assert_eq!(
        stub.procedures_called(),
        vec![Procedure::GetKnownVocabulary, Procedure::GetUnknownVocabulary]
    );
}

#[tokio::test]
async fn test_listing_with_broken_row_is_internal_error() {
    let broken = ResultRow::new().with("ID", 1).with("KnownLanguage-Word", "tree");
    let stub = StubGateway::new().with_rows(Procedure::GetAllVocabulary, vec![broken]);

    let (status, body) = get(&stub, "/api/vocab/all/7").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");
}

// ============================================================================
// SINGLE ENTRY
// ============================================================================

#[tokio::test]
async fn test_get_vocab_found() {
    let stub = StubGateway::new().with_rows(
        Procedure::GetVocabularyById,
        vec![vocab_row(3, "dog", "Hund", false)],
    );

    let (status, body) = get(&stub, "/api/vocab/7/3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"ID": 3, "KnownWord": "dog", "TargetWord": "Hund", "Learnt": false})
    );

    let call = stub.last_call().unwrap();
    assert_eq!(call.statement(), "CALL GetVocabularyByID(?, ?)");
    assert_eq!(call.param("userID"), Some(&SqlValue::Int(7)));
    assert_eq!(call.param("vocabID"), Some(&SqlValue::Int(3)));
}

#[tokio::test]
async fn test_get_vocab_missing_is_not_found() {
    let stub = StubGateway::new();

    let (status, body) = get(&stub, "/api/vocab/7/3").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Vocabulary item not found.");
}

#[tokio::test]
async fn test_get_vocab_non_integer_path_is_rejected() {
    let stub = StubGateway::new();

    let (status, body) = get(&stub, "/api/vocab/7/three").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn test_listings_reject_unparsable_user_id() {
    for uri in [
        "/api/vocab/all/seven",
        "/api/vocab/known/3000000000",
        "/api/vocab/unknown/1.5",
    ] {
        let stub = StubGateway::new();

        let (status, body) = get(&stub, uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "VALIDATION_FAILED", "{}", uri);
        assert_eq!(stub.call_count(), 0, "{}", uri);
    }
}

#[tokio::test]
async fn test_delete_vocab_non_integer_path_is_rejected() {
    let stub = StubGateway::new();

    let (status, body) = delete(&stub, "/api/vocab/seven/3").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(stub.call_count(), 0);
}

// ============================================================================
// DELETE /api/vocab/:user_id/:vocab_id
// ============================================================================

#[tokio::test]
async fn test_delete_vocab_returns_status_verbatim() {
    let stub = StubGateway::new().with_rows(
        Procedure::DeleteVocabulary,
        vec![status_row("Vocabulary deleted successfully.")],
    );

    let (status, body) = delete(&stub, "/api/vocab/7/3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Vocabulary deleted successfully."}));
}

#[tokio::test]
async fn test_delete_vocab_without_row_fails() {
    let stub = StubGateway::new();

    let (status, body) = delete(&stub, "/api/vocab/7/3").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Deletion failed.");
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Listings decode exactly the rows the procedure returned, in order.
    #[test]
    fn prop_list_all_keeps_every_row_in_order(rows in generators::vocab_rows(8)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let expected: Vec<i64> = rows
                .iter()
                .map(|row| row.get_i64("ID").unwrap())
                .collect();
            let stub = StubGateway::new().with_rows(Procedure::GetAllVocabulary, rows);

            let (status, body) = get(&stub, "/api/vocab/all/7").await;

            prop_assert_eq!(status, StatusCode::OK);
            let ids: Vec<i64> = body
                .as_array()
                .unwrap()
                .iter()
                .map(|entry| entry["ID"].as_i64().unwrap())
                .collect();
            prop_assert_eq!(ids, expected);
            Ok(())
        })?;
    }

    /// The same lookup against unchanged data answers identically.
    #[test]
    fn prop_get_vocab_is_repeatable(
        user_id in generators::positive_id(),
        vocab_id in generators::positive_id(),
        learnt in any::<bool>(),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let stub = StubGateway::new().with_rows(
                Procedure::GetVocabularyById,
                vec![vocab_row(vocab_id, "house", "Haus", learnt)],
            );
            let uri = format!("/api/vocab/{}/{}", user_id, vocab_id);

            let first = get(&stub, &uri).await;
            let second = get(&stub, &uri).await;

            prop_assert_eq!(first.0, StatusCode::OK);
            prop_assert_eq!(first, second);
            Ok(())
        })?;
    }

    /// Any blank word or non-positive owner is rejected without a call.
    #[test]
    fn prop_invalid_vocab_request_never_reaches_database(
        user_id in generators::non_positive_id(),
        known in generators::word(),
        target in generators::blank_string(),
        blank_target in any::<bool>(),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            // Either the owner is invalid or the target word is blank.
            let (user_id, target) = if blank_target {
                (7, target)
            } else {
                (user_id, "Haus".to_string())
            };
            let stub = StubGateway::new().with_rows(Procedure::AddVocabulary, vec![vocab_id_row(1)]);

            let (status, body) = post(
                &stub,
                "/api/vocab",
                json!({"UserID": user_id, "KnownWord": known, "TargetWord": target}),
            )
            .await;

            prop_assert_eq!(status, StatusCode::BAD_REQUEST);
            prop_assert_eq!(&body["message"], "User ID, KnownWord, and TargetWord are required.");
            prop_assert_eq!(stub.call_count(), 0);
            Ok(())
        })?;
    }
}
