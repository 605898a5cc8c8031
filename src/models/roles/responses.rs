use super::entities::GraderPermission;
use serde::Serialize;

// 助教列表条目
#[derive(Debug, Serialize)]
pub struct TaListItem {
    pub id: i64,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub hidden: bool,
    pub grader_permission: Option<GraderPermission>,
}

// 助教列表响应
#[derive(Debug, Serialize)]
pub struct TaListResponse {
    pub items: Vec<TaListItem>,
}
