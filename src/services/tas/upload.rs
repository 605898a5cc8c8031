//! 助教名单批量上传
//!
//! 只负责读取文件并入队 UploadRolesJob，响应返回时数据尚未写入。

use actix_multipart::Multipart;
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use tracing::{error, info};

use super::TaService;
use crate::config::AppConfig;
use crate::errors::RosterError;
use crate::jobs::UploadRolesJob;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, jobs::responses::JobEnqueuedResponse, roles::entities::RoleKind,
};

const UPLOAD_FIELD: &str = "upload_file";
pub const JOB_ID_HEADER: &str = "X-Job-Id";

/// 读取上传文件的错误
enum UploadReadError {
    Missing,
    TooLarge(usize),
    Multipart(String),
}

pub async fn upload_tas(
    service: &TaService,
    course_id: i64,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let max_size = AppConfig::get().upload.max_size;

    // 1. 读取文件内容
    let file_bytes = match read_file_from_multipart(&mut payload, max_size).await {
        Ok(bytes) => bytes,
        Err(UploadReadError::Missing) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                "No file was uploaded or the file is empty",
            )));
        }
        Err(UploadReadError::TooLarge(limit)) => {
            return Ok(HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
                ErrorCode::FileTooLarge,
                format!("File exceeds the maximum size of {limit} bytes"),
            )));
        }
        Err(UploadReadError::Multipart(e)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("Failed to read uploaded file: {e}"),
            )));
        }
    };

    // 2. 必须是 UTF-8 文本
    let data = match String::from_utf8(file_bytes) {
        Ok(data) => data,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ImportFileDataInvalid,
                "Uploaded file is not valid UTF-8 text",
            )));
        }
    };

    let Some(queue) = service.get_job_queue(request) else {
        error!("Job queue not found in app data");
        return Ok(
            HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                ErrorCode::JobQueueFull,
                "Background jobs are not available",
            )),
        );
    };
    let requested_by = RequireJWT::extract_user_id(request).unwrap_or_default();

    // 3. 入队，不等待执行
    let job = UploadRolesJob::new(course_id, RoleKind::Ta, data);
    match queue.enqueue(job, requested_by).await {
        Ok(job_id) => {
            info!(
                "Enqueued {} {} for course {} by user {}",
                UploadRolesJob::NAME,
                job_id,
                course_id,
                requested_by
            );
            Ok(HttpResponse::Found()
                .insert_header((LOCATION, format!("/courses/{course_id}/tas")))
                .insert_header((JOB_ID_HEADER, job_id.clone()))
                .json(ApiResponse::success(
                    JobEnqueuedResponse { job_id },
                    "Upload accepted, TAs will be created in the background",
                )))
        }
        Err(RosterError::JobQueue(message)) => Ok(HttpResponse::ServiceUnavailable().json(
            ApiResponse::error_empty(ErrorCode::JobQueueFull, message),
        )),
        Err(e) => {
            error!("入队失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to enqueue upload: {e}"),
                )),
            )
        }
    }
}

async fn read_file_from_multipart(
    payload: &mut Multipart,
    max_size: usize,
) -> Result<Vec<u8>, UploadReadError> {
    let mut file_bytes = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadReadError::Multipart(format!("读取字段失败: {e}")))?;

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        // 读取内容
        while let Some(chunk) = field.next().await {
            let data =
                chunk.map_err(|e| UploadReadError::Multipart(format!("读取数据失败: {e}")))?;
            if file_bytes.len() + data.len() > max_size {
                return Err(UploadReadError::TooLarge(max_size));
            }
            file_bytes.extend_from_slice(&data);
        }
    }

    if file_bytes.is_empty() {
        return Err(UploadReadError::Missing);
    }

    Ok(file_bytes)
}
