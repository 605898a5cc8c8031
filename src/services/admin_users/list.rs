use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use askama::Template;
use tracing::error;

use super::{AdminUserService, ResponseFormat};
use crate::models::{ApiResponse, ErrorCode, users::responses::UserListItem};
use crate::views::UserIndexPage;

pub async fn list_users(
    service: &AdminUserService,
    format: Option<&str>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let format = match ResponseFormat::negotiate(format, request) {
        Ok(format) => format,
        Err(message) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, message)));
        }
    };

    let storage = service.get_storage(request);

    let users = match storage.list_all_users().await {
        Ok(users) => users,
        Err(e) => {
            error!("查询用户列表失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve user list: {e}"),
                )),
            );
        }
    };

    match format {
        // JSON 输出为裸数组，不带 ApiResponse 包装
        ResponseFormat::Json => {
            let items: Vec<UserListItem> = users.into_iter().map(UserListItem::from).collect();
            Ok(HttpResponse::Ok().json(items))
        }
        ResponseFormat::Html => match UserIndexPage::new(users).render() {
            Ok(html) => Ok(HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(html)),
            Err(e) => {
                error!("渲染用户列表失败: {}", e);
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to render user list",
                    )),
                )
            }
        },
    }
}
