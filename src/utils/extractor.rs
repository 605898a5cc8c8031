//! 安全的路径参数提取器
//!
//! 路径参数解析失败时返回统一的 ApiResponse 而不是 actix 默认的纯文本错误。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 定义 i64 路径参数提取器
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_i64_param(req, $param).map($name))
            }
        }
    };
}

fn parse_i64_param(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    raw.parse::<i64>().map_err(|_| {
        let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Invalid path parameter '{param}': {raw}"),
        ));
        InternalError::from_response(format!("invalid {param}"), response).into()
    })
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_i64_extractor!(SafeCourseIdI64, "course_id");

/// 任务 ID（uuid 字符串）
#[derive(Debug, Clone)]
pub struct SafeJobId(pub String);

impl FromRequest for SafeJobId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("job_id").unwrap_or_default();
        let result = uuid::Uuid::parse_str(raw)
            .map(|id| SafeJobId(id.to_string()))
            .map_err(|_| {
                let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    format!("Invalid job id: {raw}"),
                ));
                InternalError::from_response("invalid job_id", response).into()
            });
        ready(result)
    }
}
