//! 用户存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, RosterError};
use crate::models::users::{
    entities::{User, UserType},
    requests::{CreateUserRequest, UpdateUserRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_name: Set(req.user_name),
            email: Set(req.email),
            id_number: Set(req.id_number),
            user_type: Set(req.user_type.to_string()),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            password_hash: Set(req.password),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                RosterError::validation("用户名已被占用")
            } else {
                RosterError::database_operation(format!("创建用户失败: {e}"))
            }
        })?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, user_name: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::UserName.eq(user_name))
            .one(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取 EndUser
    pub async fn get_human_by_username_impl(&self, user_name: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::UserName.eq(user_name))
            .filter(Column::UserType.eq(UserType::END_USER))
            .one(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 列出全部用户
    pub async fn list_all_users_impl(&self) -> Result<Vec<User>> {
        let users = Users::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 更新用户信息，全部字段在同一事务中写入
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RosterError::database_operation(format!("开启事务失败: {e}")))?;

        // 先检查用户是否存在
        let Some(existing) = Users::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| RosterError::database_operation(format!("查询用户失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let mut model: ActiveModel = existing.into();
        model.user_name = Set(update.user_name);
        model.email = Set(update.email);
        model.id_number = Set(update.id_number);
        model.user_type = Set(update.user_type.to_string());
        model.first_name = Set(update.first_name);
        model.last_name = Set(update.last_name);
        model.updated_at = Set(now);

        let updated = model.update(&txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                RosterError::validation("用户名已被占用")
            } else {
                RosterError::database_operation(format!("更新用户失败: {e}"))
            }
        })?;

        txn.commit()
            .await
            .map_err(|e| RosterError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(updated.into_user()))
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }
}
