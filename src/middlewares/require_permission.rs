/*!
 * 用户级权限中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，按静态权限表判断当前用户类型能否执行某个操作。
 *
 * ```rust,ignore
 * web::scope("/admin/users")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_users).wrap(RequirePermission::new(Action::ListUsers)))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{ErrorCode, permissions::Action, users::entities::User};

use super::create_error_response;

#[derive(Clone, Copy)]
pub struct RequirePermission {
    action: Action,
}

impl RequirePermission {
    pub fn new(action: Action) -> Self {
        Self { action }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            action: self.action,
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    action: Action,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
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
            let user_type = req.extensions().get::<User>().map(|user| user.user_type);
            let Some(user_type) = user_type else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Unauthorized: missing user claims",
                    )
                    .map_into_right_body(),
                ));
            };

            if action.permits_user_type(user_type) {
                let res = srv.call(req).await?.map_into_left_body();
                return Ok(res);
            }

            info!(
                "Permission denied: {} may not perform {:?} on {}",
                user_type,
                action,
                req.path()
            );
            Ok(req.into_response(
                create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::PermissionDenied,
                    "You are not authorized to perform this action",
                )
                .map_into_right_body(),
            ))
        })
    }
}
