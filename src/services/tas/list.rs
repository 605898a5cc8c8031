use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::TaService;
use crate::models::{ApiResponse, ErrorCode, roles::responses::TaListResponse};

pub async fn list_tas(
    service: &TaService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_tas(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TaListResponse { items },
            "TA list retrieved successfully",
        ))),
        Err(e) => {
            error!("查询助教列表失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve TA list: {e}"),
                )),
            )
        }
    }
}
