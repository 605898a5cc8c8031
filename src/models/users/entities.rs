use serde::{Deserialize, Serialize};

// 用户类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum UserType {
    AdminUser,    // 系统管理员
    EndUser,      // 普通用户（课程中的教师、助教、学生）
    AutotestUser, // 自动测试服务账号
}

impl UserType {
    pub const ADMIN_USER: &'static str = "AdminUser";
    pub const END_USER: &'static str = "EndUser";
    pub const AUTOTEST_USER: &'static str = "AutotestUser";

    pub fn all_types() -> &'static [UserType] {
        &[Self::AdminUser, Self::EndUser, Self::AutotestUser]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::AdminUser => Self::ADMIN_USER,
            UserType::EndUser => Self::END_USER,
            UserType::AutotestUser => Self::AUTOTEST_USER,
        }
    }
}

impl<'de> Deserialize<'de> for UserType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户类型: '{s}'. 支持的类型: AdminUser, EndUser, AutotestUser"
            ))
        })
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserType::ADMIN_USER => Ok(UserType::AdminUser),
            UserType::END_USER => Ok(UserType::EndUser),
            UserType::AUTOTEST_USER => Ok(UserType::AutotestUser),
            _ => Err(format!("Invalid user type: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub email: Option<String>,
    pub id_number: Option<String>,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成访问令牌
    pub fn generate_access_token(&self) -> Result<String, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_access_token(self.id, self.user_type.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_round_trips_through_str() {
        for user_type in UserType::all_types() {
            assert_eq!(user_type.as_str().parse::<UserType>(), Ok(*user_type));
        }
    }

    #[test]
    fn test_unknown_user_type_rejected() {
        assert!("Not a real type".parse::<UserType>().is_err());
        assert!("adminuser".parse::<UserType>().is_err());
        assert!(serde_json::from_str::<UserType>(r#""Ta""#).is_err());
    }

    #[test]
    fn test_user_serializes_type_key() {
        let user = User {
            id: 1,
            user_name: "spiderman".to_string(),
            email: None,
            id_number: Some("1122018".to_string()),
            user_type: UserType::EndUser,
            first_name: "Miles".to_string(),
            last_name: "Morales".to_string(),
            password_hash: Some("secret".to_string()),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["type"], "EndUser");
        assert!(json.get("password_hash").is_none());
    }
}
