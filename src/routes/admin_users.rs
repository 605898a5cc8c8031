use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::permissions::Action;
use crate::models::users::requests::{UpdateUserParams, UserFormSubmission, UserListParams};
use crate::services::AdminUserService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AdminUserService 实例
static ADMIN_USER_SERVICE: Lazy<AdminUserService> = Lazy::new(AdminUserService::new_lazy);

// HTTP处理程序
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_USER_SERVICE
        .list_users(query.format.as_deref(), &req)
        .await
}

pub async fn list_users_json(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_USER_SERVICE.list_users(Some("json"), &req).await
}

pub async fn edit_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_USER_SERVICE.edit_user(user_id.0, &req).await
}

// PUT 同时接受 JSON 和编辑页的 urlencoded 表单
pub async fn update_user(
    req: HttpRequest,
    user_id: SafeIDI64,
    update_data: web::Either<web::Json<UpdateUserParams>, web::Form<UserFormSubmission>>,
) -> ActixResult<HttpResponse> {
    let params = match update_data {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner().into(),
    };
    ADMIN_USER_SERVICE.update_user(user_id.0, params, &req).await
}

pub async fn submit_user_form(
    req: HttpRequest,
    user_id: SafeIDI64,
    form: web::Form<UserFormSubmission>,
) -> ActixResult<HttpResponse> {
    ADMIN_USER_SERVICE
        .submit_user_form(user_id.0, form.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_admin_user_routes(cfg: &mut web::ServiceConfig) {
    // 带扩展名的列表地址单独注册，scope 前缀只按路径段匹配
    cfg.service(
        web::resource("/admin/users.json")
            .wrap(RequireJWT)
            .route(
                web::get()
                    .to(list_users_json)
                    .wrap(RequirePermission::new(Action::ListUsers)),
            ),
    )
    .service(
        web::scope("/admin/users")
            .wrap(RequireJWT)
            .route(
                "",
                web::get()
                    .to(list_users)
                    .wrap(RequirePermission::new(Action::ListUsers)),
            )
            .route(
                "/{id}/edit",
                web::get()
                    .to(edit_user)
                    .wrap(RequirePermission::new(Action::EditUser)),
            )
            .route(
                "/{id}",
                web::put()
                    .to(update_user)
                    .wrap(RequirePermission::new(Action::UpdateUser)),
            )
            // 浏览器表单只能 POST，靠 `_method` 字段声明为更新
            .route(
                "/{id}",
                web::post()
                    .to(submit_user_form)
                    .wrap(RequirePermission::new(Action::UpdateUser)),
            ),
    );
}
