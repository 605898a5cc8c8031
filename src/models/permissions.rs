//! 静态权限表
//!
//! 每个受保护的操作只对应一张允许名单：全局操作按用户类型判断，
//! 课程操作按请求者在目标课程中的角色判断。

use super::roles::entities::RoleKind;
use super::users::entities::UserType;

/// 受保护的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListUsers,
    EditUser,
    UpdateUser,
    ListTas,
    CreateTa,
    UploadTas,
    DownloadTas,
}

/// 操作的判断依据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionScope {
    /// 按用户类型判断
    Global,
    /// 按请求者在路径中课程的角色判断
    Course,
}

static USER_TYPE_PERMISSIONS: &[(Action, &[UserType])] = &[
    (Action::ListUsers, &[UserType::AdminUser]),
    (Action::EditUser, &[UserType::AdminUser]),
    (Action::UpdateUser, &[UserType::AdminUser]),
];

static COURSE_ROLE_PERMISSIONS: &[(Action, &[RoleKind])] = &[
    (Action::ListTas, &[RoleKind::AdminRole, RoleKind::Instructor]),
    (Action::CreateTa, &[RoleKind::AdminRole, RoleKind::Instructor]),
    (Action::UploadTas, &[RoleKind::AdminRole, RoleKind::Instructor]),
    (Action::DownloadTas, &[RoleKind::AdminRole, RoleKind::Instructor]),
];

impl Action {
    pub fn scope(&self) -> ActionScope {
        match self {
            Action::ListUsers | Action::EditUser | Action::UpdateUser => ActionScope::Global,
            Action::ListTas | Action::CreateTa | Action::UploadTas | Action::DownloadTas => {
                ActionScope::Course
            }
        }
    }

    /// 用户类型是否允许执行该操作；课程操作一律返回 false
    pub fn permits_user_type(&self, user_type: UserType) -> bool {
        USER_TYPE_PERMISSIONS
            .iter()
            .find(|(action, _)| action == self)
            .is_some_and(|(_, allowed)| allowed.contains(&user_type))
    }

    /// 课程角色是否允许执行该操作；全局操作一律返回 false
    pub fn permits_role(&self, role: RoleKind) -> bool {
        COURSE_ROLE_PERMISSIONS
            .iter()
            .find(|(action, _)| action == self)
            .is_some_and(|(_, allowed)| allowed.contains(&role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_ACTIONS: [Action; 3] = [Action::ListUsers, Action::EditUser, Action::UpdateUser];
    const COURSE_ACTIONS: [Action; 4] = [
        Action::ListTas,
        Action::CreateTa,
        Action::UploadTas,
        Action::DownloadTas,
    ];

    #[test]
    fn test_only_admin_users_manage_users() {
        for action in USER_ACTIONS {
            assert_eq!(action.scope(), ActionScope::Global);
            assert!(action.permits_user_type(UserType::AdminUser));
            assert!(!action.permits_user_type(UserType::EndUser));
            assert!(!action.permits_user_type(UserType::AutotestUser));
        }
    }

    #[test]
    fn test_course_roster_requires_course_admin_role() {
        for action in COURSE_ACTIONS {
            assert_eq!(action.scope(), ActionScope::Course);
            assert!(action.permits_role(RoleKind::AdminRole));
            assert!(action.permits_role(RoleKind::Instructor));
            assert!(!action.permits_role(RoleKind::Ta));
            assert!(!action.permits_role(RoleKind::Student));
        }
    }

    #[test]
    fn test_scopes_do_not_leak() {
        for action in USER_ACTIONS {
            for role in RoleKind::all_roles() {
                assert!(!action.permits_role(*role));
            }
        }
        for action in COURSE_ACTIONS {
            for user_type in UserType::all_types() {
                assert!(!action.permits_user_type(*user_type));
            }
        }
    }
}
