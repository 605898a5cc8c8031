//! 课程角色与评分权限存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::grader_permissions::{
    ActiveModel as GraderPermissionActiveModel, Column as GraderPermissionColumn,
    Entity as GraderPermissions,
};
use crate::entity::roles::{ActiveModel, Column, Entity as Roles};
use crate::entity::users::Entity as Users;
use crate::errors::{Result, RosterError};
use crate::models::roles::{
    entities::{GraderPermission, Role, RoleKind, RosterRecord},
    requests::CreateRoleRequest,
    responses::TaListItem,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 获取用户在课程中的角色
    pub async fn get_role_by_user_and_course_impl(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Option<Role>> {
        let result = Roles::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("查询课程角色失败: {e}")))?;

        Ok(result.map(|m| m.into_role()))
    }

    /// 创建课程角色，Ta 角色同时写入评分权限
    pub async fn create_role_impl(&self, req: CreateRoleRequest) -> Result<Role> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RosterError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            user_id: Set(req.user_id),
            course_id: Set(req.course_id),
            role_type: Set(req.role_type.to_string()),
            hidden: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let role = model.insert(&txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                RosterError::validation("该用户在课程中已有角色")
            } else {
                RosterError::database_operation(format!("创建课程角色失败: {e}"))
            }
        })?;

        if req.role_type == RoleKind::Ta {
            let permission = GraderPermissionActiveModel {
                role_id: Set(role.id),
                manage_assessments: Set(req.grader_permission.manage_assessments),
                manage_submissions: Set(req.grader_permission.manage_submissions),
                run_tests: Set(req.grader_permission.run_tests),
                ..Default::default()
            };
            permission
                .insert(&txn)
                .await
                .map_err(|e| RosterError::database_operation(format!("创建评分权限失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| RosterError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(role.into_role())
    }

    /// 列出课程助教及评分权限
    pub async fn list_tas_impl(&self, course_id: i64) -> Result<Vec<TaListItem>> {
        let rows = Roles::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::RoleType.eq(RoleKind::TA))
            .order_by_asc(Column::Id)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("查询助教列表失败: {e}")))?;

        let role_ids: Vec<i64> = rows.iter().map(|(role, _)| role.id).collect();
        let mut permissions: HashMap<i64, GraderPermission> = GraderPermissions::find()
            .filter(GraderPermissionColumn::RoleId.is_in(role_ids))
            .all(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("查询评分权限失败: {e}")))?
            .into_iter()
            .map(|m| (m.role_id, m.into_grader_permission()))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|(role, user)| {
                let user = user?;
                Some(TaListItem {
                    id: role.id,
                    user_name: user.user_name,
                    first_name: user.first_name,
                    last_name: user.last_name,
                    email: user.email,
                    hidden: role.hidden,
                    grader_permission: permissions.remove(&role.id),
                })
            })
            .collect())
    }

    /// 列出名单导出记录
    pub async fn list_roster_impl(
        &self,
        course_id: i64,
        kind: RoleKind,
    ) -> Result<Vec<RosterRecord>> {
        let rows = Roles::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::RoleType.eq(kind.as_str()))
            .order_by_asc(Column::Id)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("查询课程名单失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, user)| user)
            .map(|user| RosterRecord {
                user_name: user.user_name,
                last_name: user.last_name,
                first_name: user.first_name,
                email: user.email,
            })
            .collect())
    }

    /// 统计课程中某类角色数量
    pub async fn count_roles_impl(&self, course_id: i64, kind: RoleKind) -> Result<u64> {
        let count = Roles::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::RoleType.eq(kind.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("统计课程角色失败: {e}")))?;

        Ok(count)
    }

    /// 获取角色的评分权限
    pub async fn get_grader_permission_by_role_id_impl(
        &self,
        role_id: i64,
    ) -> Result<Option<GraderPermission>> {
        let result = GraderPermissions::find()
            .filter(GraderPermissionColumn::RoleId.eq(role_id))
            .one(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("查询评分权限失败: {e}")))?;

        Ok(result.map(|m| m.into_grader_permission()))
    }
}
