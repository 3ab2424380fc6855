mod common;

use catalog_api::application::services::{AuthService, Claims, TokenSettings};
use chrono::Utc;
use common::{ACTIVE_USER, AUDIENCE, ISSUER};
use std::time::Duration;

fn claims(sub: &str, iss: &str, aud: &str, nbf: i64, exp: i64) -> Claims {
    Claims {
        sub: sub.to_string(),
        iss: iss.to_string(),
        aud: vec![aud.to_string()],
        nbf: Some(nbf),
        exp,
        iat: nbf,
    }
}

#[tokio::test]
async fn test_credential_rejections_are_indistinguishable() {
    let app = common::create_test_app(&common::test_config()).await;
    let server = common::test_server(&app);
    let auth = &app.state.auth_service;
    let now = Utc::now().timestamp();

    let foreign = AuthService::new(
        app.store.clone(),
        TokenSettings {
            secret: "some-other-secret-entirely-0123456789".to_string(),
            issuer: ISSUER.to_string(),
            audience: AUDIENCE.to_string(),
        },
    );

    let expired = auth
        .sign(&claims("1", ISSUER, AUDIENCE, now - 3600, now - 1))
        .unwrap();
    let not_yet_valid = auth
        .sign(&claims("1", ISSUER, AUDIENCE, now + 3600, now + 7200))
        .unwrap();
    let wrong_issuer = auth
        .sign(&claims("1", "someone-else", AUDIENCE, now, now + 3600))
        .unwrap();
    let wrong_audience = auth
        .sign(&claims("1", ISSUER, "another-api", now, now + 3600))
        .unwrap();
    let unknown_user = auth
        .sign(&claims("999", ISSUER, AUDIENCE, now, now + 3600))
        .unwrap();
    let bad_signature = foreign
        .issue_token(ACTIVE_USER, Duration::from_secs(3600))
        .unwrap();
    let valid = common::token_for(&app, ACTIVE_USER);

    let headers = vec![
        "Bearer".to_string(),
        format!("Token {valid}"),
        format!("Bearer  {valid}"),
        format!("Bearer {valid} extra"),
        "Bearer not-a-jwt".to_string(),
        common::bearer(&expired),
        common::bearer(&not_yet_valid),
        common::bearer(&wrong_issuer),
        common::bearer(&wrong_audience),
        common::bearer(&unknown_user),
        common::bearer(&bad_signature),
    ];

    let mut bodies = Vec::new();
    for header in headers {
        let response = server
            .get("/v1/healthcheck")
            .add_header("Authorization", header.clone())
            .await;

        response.assert_status_unauthorized();
        assert_eq!(response.header("www-authenticate"), "Bearer", "{header}");
        bodies.push(response.text());
    }

    let first = &bodies[0];
    assert!(bodies.iter().all(|b| b == first));
    let json: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(json["error"]["code"], "invalid_authentication_token");
}

#[tokio::test]
async fn test_recently_expired_token_is_rejection_not_failure() {
    let app = common::create_test_app(&common::test_config()).await;
    let server = common::test_server(&app);
    let now = Utc::now().timestamp();
    let token = app
        .state
        .auth_service
        .sign(&claims("1", ISSUER, AUDIENCE, now - 60, now - 1))
        .unwrap();

    let response = server
        .get("/v1/me")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_unauthorized();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_authentication_token");
}

#[tokio::test]
async fn test_audience_list_containing_configured_audience_is_accepted() {
    let app = common::create_test_app(&common::test_config()).await;
    let server = common::test_server(&app);
    let now = Utc::now().timestamp();
    let mut multi = claims("1", ISSUER, "reporting-api", now, now + 3600);
    multi.aud.push(AUDIENCE.to_string());
    let token = app.state.auth_service.sign(&multi).unwrap();

    server
        .get("/v1/me")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_no_credential_is_anonymous_not_rejected() {
    let app = common::create_test_app(&common::test_config()).await;
    let server = common::test_server(&app);

    server.get("/v1/healthcheck").await.assert_status_ok();

    let response = server.get("/v1/me").await;
    response.assert_status_unauthorized();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "authentication_required");
    assert!(response.headers().get("www-authenticate").is_none());
}

#[tokio::test]
async fn test_empty_authorization_header_is_anonymous() {
    let app = common::create_test_app(&common::test_config()).await;
    let server = common::test_server(&app);

    let response = server
        .get("/v1/healthcheck")
        .add_header("Authorization", "")
        .await;

    response.assert_status_ok();
    let vary: Vec<_> = response.headers().get_all("vary").iter().collect();
    assert!(vary.iter().any(|v| *v == "Authorization"));

    let response = server.get("/v1/me").add_header("Authorization", "").await;
    response.assert_status_unauthorized();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "authentication_required");
}

#[tokio::test]
async fn test_every_response_varies_on_authorization() {
    let app = common::create_test_app(&common::test_config()).await;
    let server = common::test_server(&app);
    let token = common::token_for(&app, ACTIVE_USER);

    let responses = vec![
        server.get("/v1/healthcheck").await,
        server
            .get("/v1/me")
            .add_header("Authorization", common::bearer(&token))
            .await,
        server
            .get("/v1/me")
            .add_header("Authorization", "Bearer garbage")
            .await,
        server.get("/v1/me").await,
    ];

    for response in responses {
        let vary: Vec<_> = response.headers().get_all("vary").iter().collect();
        assert!(
            vary.iter().any(|v| *v == "Authorization"),
            "status {} lacks Vary: Authorization",
            response.status_code()
        );
    }
}

#[tokio::test]
async fn test_user_lookup_sees_deactivation_immediately() {
    let app = common::create_test_app(&common::test_config()).await;
    let server = common::test_server(&app);
    let token = common::token_for(&app, ACTIVE_USER);

    server
        .get("/v1/me")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status_ok();

    let alice = catalog_api::domain::entities::User {
        id: ACTIVE_USER,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        activated: false,
    };
    app.store.insert_user(alice, vec![]).await;

    server
        .get("/v1/me")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(axum::http::StatusCode::FORBIDDEN);
}
