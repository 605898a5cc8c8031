/*!
 * 基于课程角色的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用。它从路径中读取 `course_id`，
 * 查询当前用户在该课程中的角色，再按静态权限表判断。
 *
 * ```rust,ignore
 * web::scope("/courses/{course_id}/tas")
 *     .wrap(RequireJWT)
 *     .route("", web::post().to(create_ta).wrap(RequireCourseRole::new(Action::CreateTa)))
 * ```
 *
 * 用户类型不参与判断：AdminUser 在课程中没有角色同样会被拒绝。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{error, info};

use crate::{
    models::{ErrorCode, permissions::Action, roles::entities::Role, users::entities::User},
    storage::Storage,
};

use super::create_error_response;

#[derive(Clone, Copy)]
pub struct RequireCourseRole {
    action: Action,
}

impl RequireCourseRole {
    pub fn new(action: Action) -> Self {
        Self { action }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireCourseRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireCourseRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireCourseRoleMiddleware {
            service: Rc::new(service),
            action: self.action,
        }))
    }
}

pub struct RequireCourseRoleMiddleware<S> {
    service: Rc<S>,
    action: Action,
}

impl<S, B> Service<ServiceRequest> for RequireCourseRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let action = self.action;

        Box::pin(async move {
            // 1. 校验用户信息
            let user_opt = req.extensions().get::<User>().cloned();
            let Some(user) = user_opt else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Unauthorized: missing user claims",
                    )
                    .map_into_right_body(),
                ));
            };

            // 2. 校验 course_id
            let Some(course_id) = req
                .match_info()
                .get("course_id")
                .and_then(|s| s.parse::<i64>().ok())
            else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::BAD_REQUEST,
                        ErrorCode::BadRequest,
                        "Missing or invalid course_id",
                    )
                    .map_into_right_body(),
                ));
            };

            // 3. 查询课程与用户在课程中的角色
            let lookup = match lookup_course_role(&req, user.id, course_id).await {
                Ok(lookup) => lookup,
                Err(message) => {
                    error!(
                        "Course role lookup failed for course {}: {}",
                        course_id, message
                    );
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Failed to check course permission",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            let role = match lookup {
                CourseRoleLookup::CourseMissing => {
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::NOT_FOUND,
                            ErrorCode::CourseNotFound,
                            "Course not found",
                        )
                        .map_into_right_body(),
                    ));
                }
                CourseRoleLookup::Found(role) => role,
            };

            // 4. 判断角色是否允许该操作
            match role {
                Some(role) if action.permits_role(role.role_type) => {
                    tracing::debug!(
                        "User {} holds {} in course {}",
                        user.id,
                        role.role_type,
                        course_id
                    );
                    req.extensions_mut().insert(role);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                other => {
                    info!(
                        "Course permission denied: user {} ({}) may not perform {:?} in course {}",
                        user.id,
                        other
                            .map(|r| r.role_type.to_string())
                            .unwrap_or_else(|| "no role".to_string()),
                        action,
                        course_id
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::PermissionDenied,
                            "You are not authorized to perform this action",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取课程角色
impl RequireCourseRole {
    /// 从请求扩展中提取当前用户在路径课程中的角色
    pub fn extract_role(req: &actix_web::HttpRequest) -> Option<Role> {
        req.extensions().get::<Role>().cloned()
    }
}

enum CourseRoleLookup {
    CourseMissing,
    Found(Option<Role>),
}

async fn lookup_course_role(
    req: &ServiceRequest,
    user_id: i64,
    course_id: i64,
) -> Result<CourseRoleLookup, String> {
    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage not found in app data".to_string())?
        .get_ref()
        .clone();

    if storage
        .get_course_by_id(course_id)
        .await
        .map_err(|e| e.to_string())?
        .is_none()
    {
        return Ok(CourseRoleLookup::CourseMissing);
    }

    let role = storage
        .get_role_by_user_and_course(user_id, course_id)
        .await
        .map_err(|e| e.to_string())?;

    Ok(CourseRoleLookup::Found(role))
}
