//! 课程存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::courses::{ActiveModel, Entity as Courses};
use crate::errors::{Result, RosterError};
use crate::models::courses::{entities::Course, requests::CreateCourseRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            display_name: Set(req.display_name),
            is_hidden: Set(req.is_hidden),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                RosterError::validation("课程名称已存在")
            } else {
                RosterError::database_operation(format!("创建课程失败: {e}"))
            }
        })?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| RosterError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }
}
