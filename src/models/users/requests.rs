use super::entities::UserType;
use crate::models::common::deserializers::optional_string_or_number;
use serde::Deserialize;

// 用户列表查询参数（来自HTTP请求）
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    pub format: Option<String>,
}

// 管理员更新用户请求，字段包在 end_user 下
#[derive(Debug, Deserialize)]
pub struct UpdateUserParams {
    pub end_user: UserFormParams,
}

// 用户表单字段，全部可缺省，校验在服务层统一完成
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFormParams {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id_number: Option<String>,
    #[serde(default, rename = "type")]
    pub user_type: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

// 编辑页表单提交（application/x-www-form-urlencoded），键名与模板中的 name 一致
#[derive(Debug, Default, Deserialize)]
pub struct UserFormSubmission {
    #[serde(default, rename = "_method")]
    pub method: Option<String>,
    #[serde(default, rename = "end_user[user_name]")]
    pub user_name: Option<String>,
    #[serde(default, rename = "end_user[email]")]
    pub email: Option<String>,
    #[serde(default, rename = "end_user[id_number]")]
    pub id_number: Option<String>,
    #[serde(default, rename = "end_user[type]")]
    pub user_type: Option<String>,
    #[serde(default, rename = "end_user[first_name]")]
    pub first_name: Option<String>,
    #[serde(default, rename = "end_user[last_name]")]
    pub last_name: Option<String>,
}

impl UserFormSubmission {
    /// POST 表单通过 `_method` 覆盖为更新
    pub fn overrides_to_update(&self) -> bool {
        self.method
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case("put") || m.eq_ignore_ascii_case("patch"))
    }
}

impl From<UserFormSubmission> for UpdateUserParams {
    fn from(form: UserFormSubmission) -> Self {
        Self {
            end_user: UserFormParams {
                user_name: form.user_name,
                email: form.email,
                id_number: form.id_number,
                user_type: form.user_type,
                first_name: form.first_name,
                last_name: form.last_name,
            },
        }
    }
}

// 用户创建请求（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub user_name: String,
    pub email: Option<String>,
    pub id_number: Option<String>,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    /// 已经过 argon2 哈希的密码
    pub password: Option<String>,
}

// 已通过校验的用户更新（用于存储层），整条记录一次写入
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateUserRequest {
    pub user_name: String,
    pub email: Option<String>,
    pub id_number: Option<String>,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
}
