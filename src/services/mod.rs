pub mod admin_users;
pub mod auth;
pub mod jobs;
pub mod tas;

pub use admin_users::AdminUserService;
pub use auth::AuthService;
pub use jobs::JobService;
pub use tas::TaService;
