#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::TestContext;
use rust_course_roster::models::users::{entities::UserType, requests::CreateUserRequest};
use rust_course_roster::runtime::lifetime::startup::seed_admin;
use rust_course_roster::utils::password::{hash_password, verify_password};

#[actix_web::test]
async fn test_login_issues_usable_token() {
    let ctx = TestContext::new().await;
    ctx.storage
        .create_user(CreateUserRequest {
            user_name: "admin".to_string(),
            email: None,
            id_number: None,
            user_type: UserType::AdminUser,
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            password: Some(hash_password("correct horse").unwrap()),
        })
        .await
        .unwrap();
    let app = roster_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "user_name": "admin", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "user_name": "admin", "password": "correct horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["type"], "AdminUser");
    assert!(body["data"]["user"].get("password_hash").is_none());
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/admin/users.json")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_accounts_without_password_cannot_log_in() {
    let ctx = TestContext::new().await;
    ctx.user("spiderman", UserType::EndUser).await;
    let app = roster_app!(ctx);

    for password in ["", "anything"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "user_name": "spiderman", "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .set_json(json!({ "user_name": "nobody", "password": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_invalid_token_is_rejected() {
    let ctx = TestContext::new().await;
    let app = roster_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/admin/users")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_seed_admin_only_runs_on_empty_database() {
    let ctx = TestContext::new().await;
    seed_admin(&ctx.storage, Some("seeded-password".to_string())).await;
    assert_eq!(ctx.storage.count_users().await.unwrap(), 1);

    let admin = ctx
        .storage
        .get_user_by_username("admin")
        .await
        .unwrap()
        .expect("admin should be seeded");
    assert_eq!(admin.user_type, UserType::AdminUser);
    let hash = admin.password_hash.expect("admin should have a password");
    assert!(verify_password("seeded-password", &hash));

    seed_admin(&ctx.storage, Some("other".to_string())).await;
    assert_eq!(ctx.storage.count_users().await.unwrap(), 1);
}
