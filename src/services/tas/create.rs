use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::TaService;
use crate::errors::RosterError;
use crate::middlewares::{RequireCourseRole, RequireJWT};
use crate::models::{
    ApiResponse, ErrorCode,
    roles::requests::{CreateRoleRequest, CreateTaRequest},
};

pub async fn create_ta(
    service: &TaService,
    course_id: i64,
    ta_data: CreateTaRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user_name = ta_data.user_name.trim();

    // 1. 助教必须绑定到已存在的真实用户
    let human = match storage.get_human_by_username(user_name).await {
        Ok(Some(human)) => human,
        Ok(None) => {
            info!("TA creation in course {} skipped: no user {}", course_id, user_name);
            return Ok(
                HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                    ErrorCode::RoleHumanNotFound,
                    format!("User '{user_name}' does not exist"),
                )),
            );
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

    // 2. 同一课程中每个用户只能有一个角色
    match storage.get_role_by_user_and_course(human.id, course_id).await {
        Ok(Some(existing)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::RoleAlreadyExists,
                format!(
                    "User '{}' already holds the {} role in this course",
                    human.user_name, existing.role_type
                ),
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("查询课程角色失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check existing roles: {e}"),
                )),
            );
        }
    }

    // 3. 角色与评分权限在同一事务中创建，未提供的权限默认为 false
    let permission = ta_data.grader_permission_attributes.unwrap_or_default();
    let create_req = CreateRoleRequest::ta(course_id, human.id, permission);

    match storage.create_role(create_req).await {
        Ok(role) => {
            let granted_by = RequireJWT::extract_user(request)
                .map(|u| u.user_name)
                .unwrap_or_default();
            let granted_as = RequireCourseRole::extract_role(request)
                .map(|r| r.role_type.to_string())
                .unwrap_or_default();
            info!(
                "TA role {} created for {} in course {} by {} ({})",
                role.id, human.user_name, course_id, granted_by, granted_as
            );
            Ok(HttpResponse::Found()
                .insert_header((LOCATION, format!("/courses/{course_id}/tas")))
                .finish())
        }
        Err(RosterError::Validation(message)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::RoleAlreadyExists, message),
        )),
        Err(e) => {
            error!("创建助教失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RoleCreationFailed,
                    format!("Failed to create TA: {e}"),
                )),
            )
        }
    }
}
