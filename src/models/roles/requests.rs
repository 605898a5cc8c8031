use super::entities::RoleKind;
use crate::models::common::deserializers::flexible_bool;
use serde::Deserialize;

// 创建助教请求
#[derive(Debug, Deserialize)]
pub struct CreateTaRequest {
    pub user_name: String,
    #[serde(default)]
    pub grader_permission_attributes: Option<GraderPermissionAttributes>,
}

// 评分权限，未提供的字段默认为 false
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
pub struct GraderPermissionAttributes {
    #[serde(default, deserialize_with = "flexible_bool")]
    pub manage_assessments: bool,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub manage_submissions: bool,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub run_tests: bool,
}

// 名单下载参数
#[derive(Debug, Default, Deserialize)]
pub struct RosterDownloadParams {
    pub format: Option<String>,
}

// 创建课程角色（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateRoleRequest {
    pub user_id: i64,
    pub course_id: i64,
    pub role_type: RoleKind,
    /// 仅对 Ta 生效
    pub grader_permission: GraderPermissionAttributes,
}

impl CreateRoleRequest {
    pub fn ta(course_id: i64, user_id: i64, permission: GraderPermissionAttributes) -> Self {
        Self {
            user_id,
            course_id,
            role_type: RoleKind::Ta,
            grader_permission: permission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_permissions_default_to_false() {
        let req: CreateTaRequest = serde_json::from_str(r#"{"user_name": "c5bennet"}"#).unwrap();
        let perms = req.grader_permission_attributes.unwrap_or_default();
        assert!(!perms.manage_assessments);
        assert!(!perms.manage_submissions);
        assert!(!perms.run_tests);
    }

    #[test]
    fn test_partial_permissions() {
        let req: CreateTaRequest = serde_json::from_str(
            r#"{"user_name": "c5bennet", "grader_permission_attributes": {"run_tests": "true"}}"#,
        )
        .unwrap();
        let perms = req.grader_permission_attributes.unwrap();
        assert!(perms.run_tests);
        assert!(!perms.manage_assessments);
        assert!(!perms.manage_submissions);
    }
}
