#[macro_use]
mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use serde_json::{Value, json};

use common::{TestContext, bearer};
use rust_course_roster::models::roles::entities::RoleKind;
use rust_course_roster::models::users::entities::UserType;

/// 编辑页浏览器实际提交的字段
fn browser_form<'a>(user_name: &'a str, user_type: &'a str) -> Vec<(&'static str, &'a str)> {
    vec![
        ("_method", "put"),
        ("end_user[user_name]", user_name),
        ("end_user[last_name]", "Morales"),
        ("end_user[first_name]", "Miles"),
        ("end_user[email]", ""),
        ("end_user[id_number]", "1122018"),
        ("end_user[type]", user_type),
    ]
}

fn edit_form(user_name: &str, user_type: &str) -> Value {
    json!({
        "end_user": {
            "user_name": user_name,
            "email": "new@example.com",
            "id_number": 1122018,
            "type": user_type,
            "first_name": "Miles",
            "last_name": "Morales"
        }
    })
}

#[actix_web::test]
async fn test_requests_without_token_are_unauthorized() {
    let ctx = TestContext::new().await;
    let target = ctx.user("spiderman", UserType::EndUser).await;
    let app = roster_app!(ctx);

    for uri in [
        "/admin/users".to_string(),
        "/admin/users.json".to_string(),
        format!("/admin/users/{}/edit", target.id),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let req = test::TestRequest::put()
        .uri(&format!("/admin/users/{}", target.id))
        .set_json(edit_form("venom", "EndUser"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_non_admin_users_are_denied() {
    let ctx = TestContext::new().await;
    let target = ctx.user("spiderman", UserType::EndUser).await;
    let end_user = ctx.user("peter", UserType::EndUser).await;
    let autotest = ctx.user("autotest", UserType::AutotestUser).await;

    // 课程内的角色不授予任何管理权限
    let course = ctx.course("cs101").await;
    let instructor = ctx.user("gwen", UserType::EndUser).await;
    ctx.role(&instructor, &course, RoleKind::Instructor).await;
    let ta = ctx.user("miguel", UserType::EndUser).await;
    ctx.role(&ta, &course, RoleKind::Ta).await;
    let student = ctx.user("hobie", UserType::EndUser).await;
    ctx.role(&student, &course, RoleKind::Student).await;
    let app = roster_app!(ctx);

    for requester in [&end_user, &autotest, &instructor, &ta, &student] {
        for uri in [
            "/admin/users".to_string(),
            "/admin/users.json".to_string(),
            format!("/admin/users/{}/edit", target.id),
        ] {
            let req = test::TestRequest::get()
                .uri(&uri)
                .insert_header(bearer(requester))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{uri}");
        }

        let req = test::TestRequest::put()
            .uri(&format!("/admin/users/{}", target.id))
            .insert_header(bearer(requester))
            .set_json(edit_form("venom", "AdminUser"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{}", requester.user_name);

        let req = test::TestRequest::post()
            .uri(&format!("/admin/users/{}", target.id))
            .insert_header(bearer(requester))
            .set_form(browser_form("venom", "AdminUser"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{}", requester.user_name);
    }

    let unchanged = ctx
        .storage
        .get_user_by_id(target.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.user_name, "spiderman");
    assert_eq!(unchanged.user_type, UserType::EndUser);
}

#[actix_web::test]
async fn test_json_listing_returns_every_user() {
    let ctx = TestContext::new().await;
    let admin = ctx.user("admin", UserType::AdminUser).await;
    ctx.user("spiderman", UserType::EndUser).await;
    ctx.user("autotest", UserType::AutotestUser).await;
    let app = roster_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/admin/users.json")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Vec<Value> = test::read_body_json(resp).await;
    let names: Vec<&str> = body
        .iter()
        .map(|u| u["user_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["admin", "spiderman", "autotest"]);

    let first = body[0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "email",
            "first_name",
            "id",
            "id_number",
            "last_name",
            "type",
            "user_name"
        ]
    );
    assert_eq!(body[2]["type"], "AutotestUser");
}

#[actix_web::test]
async fn test_format_param_and_accept_header_select_json() {
    let ctx = TestContext::new().await;
    let admin = ctx.user("admin", UserType::AdminUser).await;
    let app = roster_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/admin/users?format=json")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Vec<Value> = test::read_body_json(resp).await;
    assert_eq!(body.len(), 1);

    let req = test::TestRequest::get()
        .uri("/admin/users")
        .insert_header(bearer(&admin))
        .insert_header((header::ACCEPT, "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Vec<Value> = test::read_body_json(resp).await;
    assert_eq!(body[0]["user_name"], "admin");

    let req = test::TestRequest::get()
        .uri("/admin/users?format=xml")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_html_listing_and_edit_form() {
    let ctx = TestContext::new().await;
    let admin = ctx.user("admin", UserType::AdminUser).await;
    let target = ctx.user("spiderman", UserType::EndUser).await;
    let app = roster_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/admin/users")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("spiderman"));
    assert!(html.contains(&format!("user_{}", target.id)));

    let req = test::TestRequest::get()
        .uri(&format!("/admin/users/{}/edit", target.id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("value=\"spiderman\""));
    assert!(html.contains(r#"method="post""#));
    assert!(html.contains(r#"name="_method" value="put""#));
    for (field, _) in browser_form("spiderman", "EndUser") {
        assert!(html.contains(&format!("name=\"{field}\"")), "{field}");
    }
}

#[actix_web::test]
async fn test_edit_page_form_submission_updates_user() {
    let ctx = TestContext::new().await;
    let admin = ctx.user("admin", UserType::AdminUser).await;
    let target = ctx.user("spiderman", UserType::EndUser).await;
    let app = roster_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/users/{}", target.id))
        .insert_header(bearer(&admin))
        .set_form(browser_form("miles", "AutotestUser"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/admin/users");

    let updated = ctx
        .storage
        .get_user_by_id(target.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.user_name, "miles");
    assert_eq!(updated.user_type, UserType::AutotestUser);
    assert_eq!(updated.id_number.as_deref(), Some("1122018"));
    assert_eq!(updated.email, None);
    assert_eq!(updated.first_name, "Miles");
    assert_eq!(updated.last_name, "Morales");

    // 同样的表单体直接 PUT 也能更新
    let req = test::TestRequest::put()
        .uri(&format!("/admin/users/{}", target.id))
        .insert_header(bearer(&admin))
        .set_form(browser_form("peter", "EndUser"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    let updated = ctx
        .storage
        .get_user_by_id(target.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.user_name, "peter");
    assert_eq!(updated.user_type, UserType::EndUser);
}

#[actix_web::test]
async fn test_edit_page_form_rejections() {
    let ctx = TestContext::new().await;
    let admin = ctx.user("admin", UserType::AdminUser).await;
    let target = ctx.user("spiderman", UserType::EndUser).await;
    let app = roster_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/users/{}", target.id))
        .insert_header(bearer(&admin))
        .set_form(browser_form("bad name!", "EndUser"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("error_explanation"));
    assert!(html.contains(r#"name="_method" value="put""#));

    // 没有 `_method` 覆盖的 POST 不做更新
    let mut without_override = browser_form("miles", "EndUser");
    without_override.remove(0);
    let req = test::TestRequest::post()
        .uri(&format!("/admin/users/{}", target.id))
        .insert_header(bearer(&admin))
        .set_form(without_override)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let req = test::TestRequest::post()
        .uri("/admin/users/9999")
        .insert_header(bearer(&admin))
        .set_form(browser_form("miles", "EndUser"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let unchanged = ctx
        .storage
        .get_user_by_id(target.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.user_name, "spiderman");
}

#[actix_web::test]
async fn test_valid_update_persists_all_fields() {
    let ctx = TestContext::new().await;
    let admin = ctx.user("admin", UserType::AdminUser).await;
    let target = ctx.user("spiderman", UserType::EndUser).await;
    let app = roster_app!(ctx);

    let req = test::TestRequest::put()
        .uri(&format!("/admin/users/{}", target.id))
        .insert_header(bearer(&admin))
        .set_json(edit_form("miles", "AutotestUser"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/admin/users");

    let updated = ctx
        .storage
        .get_user_by_id(target.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.user_name, "miles");
    assert_eq!(updated.user_type, UserType::AutotestUser);
    assert_eq!(updated.id_number.as_deref(), Some("1122018"));
    assert_eq!(updated.email.as_deref(), Some("new@example.com"));
    assert_eq!(updated.first_name, "Miles");
    assert_eq!(updated.last_name, "Morales");
}

#[actix_web::test]
async fn test_invalid_update_leaves_record_unchanged() {
    let ctx = TestContext::new().await;
    let admin = ctx.user("admin", UserType::AdminUser).await;
    let target = ctx.user("spiderman", UserType::EndUser).await;
    let app = roster_app!(ctx);

    let invalid_forms = [
        edit_form("", "EndUser"),
        edit_form("bad name!", "EndUser"),
        edit_form("miles", "Not a real type"),
        edit_form("miles", ""),
        json!({ "end_user": { "user_name": "miles", "type": "EndUser", "first_name": "", "last_name": "Morales" } }),
        json!({ "end_user": { "user_name": "miles", "type": "EndUser", "first_name": "Miles" } }),
        json!({ "end_user": { "user_name": "miles", "type": "EndUser", "first_name": "Miles", "last_name": "Morales", "email": "not-an-email" } }),
    ];

    for form in invalid_forms {
        let req = test::TestRequest::put()
            .uri(&format!("/admin/users/{}", target.id))
            .insert_header(bearer(&admin))
            .set_json(&form)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{form}");
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("error_explanation"));
    }

    let unchanged = ctx
        .storage
        .get_user_by_id(target.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.user_name, "spiderman");
    assert_eq!(unchanged.user_type, UserType::EndUser);
    assert_eq!(unchanged.first_name, target.first_name);
    assert_eq!(unchanged.email, target.email);
}

#[actix_web::test]
async fn test_duplicate_user_name_is_rejected() {
    let ctx = TestContext::new().await;
    let admin = ctx.user("admin", UserType::AdminUser).await;
    let target = ctx.user("spiderman", UserType::EndUser).await;
    ctx.user("venom", UserType::EndUser).await;
    let app = roster_app!(ctx);

    let req = test::TestRequest::put()
        .uri(&format!("/admin/users/{}", target.id))
        .insert_header(bearer(&admin))
        .set_json(edit_form("venom", "EndUser"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("User name has already been taken"));

    let unchanged = ctx
        .storage
        .get_user_by_id(target.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.user_name, "spiderman");

    // 保留自己的用户名不算重复
    let req = test::TestRequest::put()
        .uri(&format!("/admin/users/{}", target.id))
        .insert_header(bearer(&admin))
        .set_json(edit_form("spiderman", "EndUser"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn test_unknown_user_is_not_found() {
    let ctx = TestContext::new().await;
    let admin = ctx.user("admin", UserType::AdminUser).await;
    let app = roster_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/admin/users/9999/edit")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri("/admin/users/9999")
        .insert_header(bearer(&admin))
        .set_json(edit_form("miles", "EndUser"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/admin/users/not-a-number/edit")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
