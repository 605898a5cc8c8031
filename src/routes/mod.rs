pub mod admin_users;

pub mod auth;

pub mod jobs;

pub mod tas;

use actix_web::web;

pub use admin_users::configure_admin_user_routes;
pub use auth::configure_auth_routes;
pub use jobs::configure_job_routes;
pub use tas::configure_ta_routes;

/// 注册全部路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes) // 认证相关路由
        .configure(configure_admin_user_routes) // 用户管理路由
        .configure(configure_ta_routes) // 助教名单路由
        .configure(configure_job_routes); // 后台任务路由
}
