use std::sync::Arc;

use crate::models::{
    courses::{entities::Course, requests::CreateCourseRequest},
    roles::{
        entities::{GraderPermission, Role, RoleKind, RosterRecord},
        requests::CreateRoleRequest,
        responses::TaListItem,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, user_name: &str) -> Result<Option<User>>;
    // 通过用户名获取可分配课程角色的用户（EndUser）
    async fn get_human_by_username(&self, user_name: &str) -> Result<Option<User>>;
    // 列出全部用户，按 id 排序
    async fn list_all_users(&self) -> Result<Vec<User>>;
    // 整条更新用户信息（单个事务）
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;

    /// 课程角色管理方法
    // 获取用户在课程中的角色
    async fn get_role_by_user_and_course(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Option<Role>>;
    // 创建课程角色，Ta 角色同时创建评分权限（单个事务）
    async fn create_role(&self, role: CreateRoleRequest) -> Result<Role>;
    // 列出课程助教及其评分权限，按角色 id 排序
    async fn list_tas(&self, course_id: i64) -> Result<Vec<TaListItem>>;
    // 列出课程中某类角色的导出记录，按角色 id 排序
    async fn list_roster(&self, course_id: i64, kind: RoleKind) -> Result<Vec<RosterRecord>>;
    // 统计课程中某类角色数量
    async fn count_roles(&self, course_id: i64, kind: RoleKind) -> Result<u64>;
    // 获取角色的评分权限
    async fn get_grader_permission_by_role_id(
        &self,
        role_id: i64,
    ) -> Result<Option<GraderPermission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
