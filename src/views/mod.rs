//! 管理页面 HTML 渲染

pub mod admin_users;

pub use admin_users::{UserEditPage, UserIndexPage};
