use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use askama::Template;
use tracing::error;

use super::AdminUserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::views::UserEditPage;

pub async fn edit_user(
    service: &AdminUserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => {
            error!("查询用户失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve user: {e}"),
                )),
            );
        }
    };

    match UserEditPage::for_user(&user).render() {
        Ok(html) => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html)),
        Err(e) => {
            error!("渲染用户编辑页失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to render edit form",
                )),
            )
        }
    }
}
