pub mod auth;
pub mod common;
pub mod courses;
pub mod jobs;
pub mod permissions;
pub mod roles;
pub mod users;

pub use common::{ApiResponse, ErrorCode};

#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
