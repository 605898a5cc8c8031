use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::JobService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_status(
    service: &JobService,
    job_id: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user_id = RequireJWT::extract_user_id(request);
    let record = match service.get_job_queue(request) {
        Some(queue) => queue.status(job_id).await,
        None => None,
    };

    // 非发起人与不存在的任务返回相同结果
    match record {
        Some(record) if Some(record.requested_by) == user_id => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(record, "Job status retrieved")))
        }
        _ => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::JobNotFound,
            "Job not found",
        ))),
    }
}
