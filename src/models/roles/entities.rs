use serde::{Deserialize, Serialize};

// 课程角色类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RoleKind {
    Instructor, // 教师
    Ta,         // 助教
    Student,    // 学生
    AdminRole,  // 课程管理员
}

impl RoleKind {
    pub const INSTRUCTOR: &'static str = "Instructor";
    pub const TA: &'static str = "Ta";
    pub const STUDENT: &'static str = "Student";
    pub const ADMIN_ROLE: &'static str = "AdminRole";

    pub fn course_admin_roles() -> &'static [RoleKind] {
        &[Self::AdminRole, Self::Instructor]
    }
    pub fn all_roles() -> &'static [RoleKind] {
        &[Self::Instructor, Self::Ta, Self::Student, Self::AdminRole]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Instructor => Self::INSTRUCTOR,
            RoleKind::Ta => Self::TA,
            RoleKind::Student => Self::STUDENT,
            RoleKind::AdminRole => Self::ADMIN_ROLE,
        }
    }
}

impl<'de> Deserialize<'de> for RoleKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<RoleKind>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的课程角色: '{s}'. 支持的角色: Instructor, Ta, Student, AdminRole"
            ))
        })
    }
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RoleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            RoleKind::INSTRUCTOR => Ok(RoleKind::Instructor),
            RoleKind::TA => Ok(RoleKind::Ta),
            RoleKind::STUDENT => Ok(RoleKind::Student),
            RoleKind::ADMIN_ROLE => Ok(RoleKind::AdminRole),
            _ => Err(format!("Invalid role kind: {s}")),
        }
    }
}

// 课程角色，course_id 创建后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub role_type: RoleKind,
    pub hidden: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 助教评分权限
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraderPermission {
    pub id: i64,
    pub role_id: i64,
    pub manage_assessments: bool,
    pub manage_submissions: bool,
    pub run_tests: bool,
}

// 名单导出记录，字段顺序即导出列顺序
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RosterRecord {
    pub user_name: String,
    pub last_name: String,
    pub first_name: String,
    pub email: Option<String>,
}
