use actix_web::http::{StatusCode, header::LOCATION};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use askama::Template;
use tracing::{debug, error, info};

use super::AdminUserService;
use crate::errors::RosterError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::requests::{UpdateUserParams, UserFormParams, UserFormSubmission},
};
use crate::utils::validate::validate_user_form;
use crate::views::UserEditPage;

pub async fn update_user(
    service: &AdminUserService,
    user_id: i64,
    params: UpdateUserParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let form = params.end_user;

    match storage.get_user_by_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Ok(storage_failure(e)),
    }

    // 1. 校验全部字段，任一失败则不写入
    let update = match validate_user_form(&form) {
        Ok(update) => update,
        Err(errors) => return Ok(render_invalid(user_id, &form, errors)),
    };

    // 2. 用户名不能与其他用户重复
    match storage.get_user_by_username(&update.user_name).await {
        Ok(Some(other)) if other.id != user_id => {
            return Ok(render_invalid(
                user_id,
                &form,
                vec!["User name has already been taken".to_string()],
            ));
        }
        Ok(_) => {}
        Err(e) => return Ok(storage_failure(e)),
    }

    // 3. 单个事务写入
    match storage.update_user(user_id, update).await {
        Ok(Some(user)) => {
            info!("User {} updated by administrator", user.user_name);
            Ok(HttpResponse::Found()
                .insert_header((LOCATION, "/admin/users"))
                .finish())
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(RosterError::Validation(message)) => {
            Ok(render_invalid(user_id, &form, vec![message]))
        }
        Err(e) => Ok(storage_failure(e)),
    }
}

pub async fn submit_user_form(
    service: &AdminUserService,
    user_id: i64,
    form: UserFormSubmission,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !form.overrides_to_update() {
        debug!(
            "用户 {} 的表单提交缺少 _method 覆盖: {:?}",
            user_id, form.method
        );
        return Ok(HttpResponse::MethodNotAllowed().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Form submissions must declare _method=put",
        )));
    }
    update_user(service, user_id, form.into(), request).await
}

fn render_invalid(user_id: i64, form: &UserFormParams, errors: Vec<String>) -> HttpResponse {
    match UserEditPage::with_submitted(user_id, form, errors).render() {
        Ok(html) => HttpResponse::build(StatusCode::UNPROCESSABLE_ENTITY)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            error!("渲染用户编辑页失败: {}", e);
            HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "User information is invalid",
            ))
        }
    }
}

fn storage_failure(e: RosterError) -> HttpResponse {
    error!("更新用户失败: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::UserUpdateFailed,
        format!("Failed to update user information: {e}"),
    ))
}
