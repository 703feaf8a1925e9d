//! API Integration Tests
//!
//! Each test spawns its own server on a fresh in-memory store.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, test_config, TestServer,
};
use reqwest::StatusCode;
use userhub_service::{
    ConfigResponse, MessageResponse, ProfileResponse, RoleResponse, TokenResponse,
    UserListResponse, UserResponse, UserWithProfileResponse, UserWithRolesResponse,
};

async fn start() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = start().await;
    let response = server.get("/health").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = start().await;
    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = start().await;
    let response = server
        .client
        .get(format!("{}/health", server.base_url()))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "abc-123"
    );
}

#[tokio::test]
async fn test_openapi_document() {
    let server = start().await;
    let response = server.get("/api-docs/openapi.json").await.unwrap();
    let doc: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(doc["paths"]["/api/v1/users/login"]["post"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer"].is_object());
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    let server = start().await;
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/users/register", &request).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["username"], request.username.as_str());
    assert_eq!(body["email"], request.email.as_str());
    assert_eq!(body["status"], 1);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_creates_profile_and_default_role() {
    let server = start().await;
    let (request, user) = register_user(&server).await.unwrap();

    let response = server
        .get(&format!("/api/v1/users/{}/roles", user.id))
        .await
        .unwrap();
    let with_roles: UserWithRolesResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let names: Vec<_> = with_roles.roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["user"]);

    let response = server
        .get(&format!("/api/v1/users/{}/profile", user.id))
        .await
        .unwrap();
    let with_profile: UserWithProfileResponse =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(with_profile.profile.user_id, user.id);
    assert_eq!(with_profile.profile.nickname, request.username);
    assert_eq!(with_profile.profile.gender, 0);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = start().await;
    let (first, _) = register_user(&server).await.unwrap();

    let mut second = RegisterRequest::unique();
    second.username = first.username;
    let response = server.post("/api/v1/users/register", &second).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = start().await;
    let (first, _) = register_user(&server).await.unwrap();

    let mut second = RegisterRequest::unique();
    second.email = first.email;
    let response = server.post("/api/v1/users/register", &second).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let server = start().await;

    let mut short_name = RegisterRequest::unique();
    short_name.username = "ab".to_string();
    let response = server
        .post("/api/v1/users/register", &short_name)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let mut bad_email = RegisterRequest::unique();
    bad_email.email = "not-an-email".to_string();
    let response = server.post("/api/v1/users/register", &bad_email).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let mut short_password = RegisterRequest::unique();
    short_password.password = "12345".to_string();
    let response = server
        .post("/api/v1/users/register", &short_password)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let server = start().await;
    let response = server
        .client
        .post(format!("{}/api/v1/users/register", server.base_url()))
        .header("content-type", "application/json")
        .body("{\"username\":")
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Login and Token Tests
// ============================================================================

#[tokio::test]
async fn test_login() {
    let server = start().await;
    let before = chrono::Utc::now().timestamp();

    let (_, token) = register_and_login(&server).await.unwrap();

    assert!(!token.token.is_empty());
    let ttl = token.expires_at - before;
    assert!((86_390..=86_410).contains(&ttl), "unexpected ttl {ttl}");
}

#[tokio::test]
async fn test_login_tokens_are_distinct() {
    let server = start().await;
    let (request, _) = register_user(&server).await.unwrap();
    let login = LoginRequest::from_register(&request);

    let first: TokenResponse = assert_json(
        server.post("/api/v1/users/login", &login).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let second: TokenResponse = assert_json(
        server.post("/api/v1/users/login", &login).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();

    assert_ne!(first.token, second.token);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = start().await;
    let (request, _) = register_user(&server).await.unwrap();

    let login = LoginRequest {
        username: request.username,
        password: "wrong-password".to_string(),
    };
    let response = server.post("/api/v1/users/login", &login).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_unknown_user_matches_wrong_password() {
    let server = start().await;

    let login = LoginRequest {
        username: "nobody_here".to_string(),
        password: "whatever".to_string(),
    };
    let response = server.post("/api/v1/users/login", &login).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(body["error"]["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_current_user() {
    let server = start().await;
    let (user, token) = register_and_login(&server).await.unwrap();

    let response = server.get_auth("/api/v1/users/me", &token.token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, user.id);
    assert_eq!(me.username, user.username);
}

#[tokio::test]
async fn test_current_user_rejects_missing_or_bad_token() {
    let server = start().await;

    let response = server.get("/api/v1/users/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .get_auth("/api/v1/users/me", "not.a.token")
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let issuer = TestServer::start_with_config(
        test_config(&[("TOKEN_SECRET", "a-completely-different-secret-value")]).unwrap(),
    )
    .await
    .unwrap();
    let (_, token) = register_and_login(&issuer).await.unwrap();

    let server = start().await;
    register_user(&server).await.unwrap();
    let response = server.get_auth("/api/v1/users/me", &token.token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_token_of_deleted_user_rejected() {
    let server = start().await;
    let (user, token) = register_and_login(&server).await.unwrap();

    let response = server
        .delete(&format!("/api/v1/users/{}", user.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/v1/users/me", &token.token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_get_user() {
    let server = start().await;
    let (_, user) = register_user(&server).await.unwrap();

    let response = server
        .get(&format!("/api/v1/users/{}", user.id))
        .await
        .unwrap();
    let fetched: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.username, user.username);
}

#[tokio::test]
async fn test_get_user_not_found_and_bad_id() {
    let server = start().await;

    let response = server.get("/api/v1/users/424242").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "NOT_FOUND");

    let response = server.get("/api/v1/users/abc").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get("/api/v1/users/-1").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_list_users_paging() {
    let server = start().await;
    let mut ids = Vec::new();
    for _ in 0..3 {
        let (_, user) = register_user(&server).await.unwrap();
        ids.push(user.id);
    }

    let response = server.get("/api/v1/users?page=1&size=2").await.unwrap();
    let first: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.total, 3);
    assert_eq!(
        first.items.iter().map(|u| u.id).collect::<Vec<_>>(),
        ids[..2].to_vec()
    );

    let response = server.get("/api/v1/users?page=2&size=2").await.unwrap();
    let second: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second.total, 3);
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].id, ids[2]);
}

#[tokio::test]
async fn test_list_users_bad_paging_falls_back_to_defaults() {
    let server = start().await;
    register_user(&server).await.unwrap();

    let response = server.get("/api/v1/users?page=abc&size=-5").await.unwrap();
    let list: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.items.len(), 1);
}

#[tokio::test]
async fn test_update_user() {
    let server = start().await;
    let (request, user) = register_user(&server).await.unwrap();

    let update = UpdateUserRequest {
        username: format!("{}_renamed", request.username),
        email: request.email.clone(),
        password: "NewPass456".to_string(),
    };
    let response = server
        .put(&format!("/api/v1/users/{}", user.id), &update)
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.message, "User updated successfully");

    let old_login = LoginRequest::from_register(&request);
    let response = server.post("/api/v1/users/login", &old_login).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let new_login = LoginRequest {
        username: update.username,
        password: update.password,
    };
    let response = server.post("/api/v1/users/login", &new_login).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_update_user_empty_password_keeps_old_one() {
    let server = start().await;
    let (request, user) = register_user(&server).await.unwrap();

    let update = UpdateUserRequest {
        username: request.username.clone(),
        email: format!("changed_{}", request.email),
        password: String::new(),
    };
    let response = server
        .put(&format!("/api/v1/users/{}", user.id), &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post("/api/v1/users/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_update_user_conflict() {
    let server = start().await;
    let (taken, _) = register_user(&server).await.unwrap();
    let (request, user) = register_user(&server).await.unwrap();

    let update = UpdateUserRequest {
        username: taken.username,
        email: request.email,
        password: String::new(),
    };
    let response = server
        .put(&format!("/api/v1/users/{}", user.id), &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_delete_user() {
    let server = start().await;
    let (_, user) = register_user(&server).await.unwrap();

    let response = server
        .delete(&format!("/api/v1/users/{}", user.id))
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.message, "User deleted successfully");

    let response = server
        .get(&format!("/api/v1/users/{}", user.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .delete(&format!("/api/v1/users/{}", user.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_update_profile() {
    let server = start().await;
    let (_, user) = register_user(&server).await.unwrap();

    let body = serde_json::json!({
        "nickname": "Ally",
        "bio": "Hello",
        "gender": 2,
        "birthday": "1990-01-01"
    });
    let response = server
        .put(&format!("/api/v1/users/{}/profile", user.id), &body)
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.nickname, "Ally");
    assert_eq!(profile.gender, 2);
    assert_eq!(profile.avatar, "");

    let response = server
        .get(&format!("/api/v1/users/{}/profile", user.id))
        .await
        .unwrap();
    let with_profile: UserWithProfileResponse =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(with_profile.profile.id, profile.id);
    assert_eq!(with_profile.profile.bio, "Hello");
}

#[tokio::test]
async fn test_update_profile_rejects_bad_gender() {
    let server = start().await;
    let (_, user) = register_user(&server).await.unwrap();

    let response = server
        .put(
            &format!("/api/v1/users/{}/profile", user.id),
            &serde_json::json!({"gender": 3}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_profile_of_unknown_user() {
    let server = start().await;
    let response = server.get("/api/v1/users/777/profile").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Role Tests
// ============================================================================

#[tokio::test]
async fn test_seeded_roles() {
    let server = start().await;
    let response = server.get("/api/v1/roles").await.unwrap();
    let roles: Vec<RoleResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let names: Vec<_> = roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["admin", "user"]);
}

#[tokio::test]
async fn test_role_crud() {
    let server = start().await;
    let request = RoleRequest::unique();

    let response = server.post("/api/v1/roles", &request).await.unwrap();
    let role: RoleResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(role.name, request.name);

    let response = server.post("/api/v1/roles", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let rename = RoleRequest::unique();
    let response = server
        .put(&format!("/api/v1/roles/{}", role.id), &rename)
        .await
        .unwrap();
    let renamed: RoleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(renamed.name, rename.name);

    let response = server
        .delete(&format!("/api/v1/roles/{}", role.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/api/v1/roles/{}", role.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_rename_role_to_taken_name() {
    let server = start().await;
    let response = server
        .post("/api/v1/roles", &RoleRequest::unique())
        .await
        .unwrap();
    let role: RoleResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let taken = RoleRequest {
        name: "admin".to_string(),
        description: String::new(),
    };
    let response = server
        .put(&format!("/api/v1/roles/{}", role.id), &taken)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_assign_and_revoke_role() {
    let server = start().await;
    let (_, user) = register_user(&server).await.unwrap();
    let response = server
        .post("/api/v1/roles", &RoleRequest::unique())
        .await
        .unwrap();
    let role: RoleResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/users/{}/roles/{}", user.id, role.id);

    let response = server.put_empty(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Assigning twice is a no-op
    let response = server.put_empty(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/api/v1/roles/{}/users", role.id))
        .await
        .unwrap();
    let holders: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].id, user.id);

    let response = server
        .get(&format!("/api/v1/users/{}/roles", user.id))
        .await
        .unwrap();
    let with_roles: UserWithRolesResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(with_roles.roles.len(), 2);

    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/api/v1/roles/{}/users", role.id))
        .await
        .unwrap();
    let holders: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(holders.is_empty());
}

#[tokio::test]
async fn test_assign_unknown_role() {
    let server = start().await;
    let (_, user) = register_user(&server).await.unwrap();

    let response = server
        .put_empty(&format!("/api/v1/users/{}/roles/9999", user.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .put_empty(&format!("/api/v1/users/{}/roles/zero", user.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Config Tests
// ============================================================================

#[tokio::test]
async fn test_config_create_and_get() {
    let server = start().await;

    let response = server
        .post("/api/v1/configs", &ConfigRequest::new("site.name", "userhub"))
        .await
        .unwrap();
    let created: ConfigResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.key, "site.name");

    let response = server.get("/api/v1/configs/site.name").await.unwrap();
    let fetched: ConfigResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.value, "userhub");

    let response = server
        .post("/api/v1/configs", &ConfigRequest::new("site.name", "other"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.get("/api/v1/configs/missing.key").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_config_list_by_prefix() {
    let server = start().await;
    for (key, value) in [("mail.host", "smtp"), ("mail.port", "25"), ("site.name", "x")] {
        let response = server
            .post("/api/v1/configs", &ConfigRequest::new(key, value))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get("/api/v1/configs?prefix=mail.").await.unwrap();
    let mail: Vec<ConfigResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let keys: Vec<_> = mail.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["mail.host", "mail.port"]);

    let response = server.get("/api/v1/configs").await.unwrap();
    let all: Vec<ConfigResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(all.len(), 3);
}
