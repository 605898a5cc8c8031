use super::entities::{User, UserType};
use serde::Serialize;

// 用户列表条目，字段与管理页面 JSON 输出一致
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserListItem {
    pub id: i64,
    pub user_name: String,
    pub email: Option<String>,
    pub id_number: Option<String>,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserListItem {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            email: user.email,
            id_number: user.id_number,
            user_type: user.user_type,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}
