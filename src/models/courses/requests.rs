use serde::Deserialize;

// 创建课程请求（用于存储层）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub is_hidden: bool,
}
