//! 批量上传课程角色任务
//!
//! 输入为无表头 CSV，每个非空行的第一列是用户名。各行独立处理：
//! 用户不存在记为行错误，已在课程中有角色则跳过，其余创建指定类型的角色。

use csv::{ReaderBuilder, Trim};
use tracing::error;

use crate::errors::{Result, RosterError};
use crate::models::jobs::entities::{ImportRowError, JobStatus};
use crate::models::roles::{
    entities::RoleKind,
    requests::{CreateRoleRequest, GraderPermissionAttributes},
};
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct UploadRolesJob {
    pub course_id: i64,
    pub role_kind: RoleKind,
    pub data: String,
}

/// 单行处理结果
enum RowOutcome {
    Created,
    Skipped,
}

impl UploadRolesJob {
    pub const NAME: &'static str = "UploadRolesJob";

    pub fn new(course_id: i64, role_kind: RoleKind, data: String) -> Self {
        Self {
            course_id,
            role_kind,
            data,
        }
    }

    /// 解析出 (行号, 用户名)，行号从 1 开始，空行被忽略
    pub fn parse_user_names(data: &str) -> Result<Vec<(usize, String)>> {
        let data = data.trim_start_matches('\u{feff}');
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(data.as_bytes());

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 1);
            let user_name = record.get(0).unwrap_or_default();
            if user_name.is_empty() && record.iter().all(str::is_empty) {
                continue;
            }
            rows.push((line, user_name.to_string()));
        }
        Ok(rows)
    }

    /// 执行任务，返回最终状态
    pub async fn perform(&self, storage: &dyn Storage) -> JobStatus {
        match self.run(storage).await {
            Ok(status) => status,
            Err(e) => JobStatus::Failed {
                message: e.message().to_string(),
            },
        }
    }

    async fn run(&self, storage: &dyn Storage) -> Result<JobStatus> {
        if storage.get_course_by_id(self.course_id).await?.is_none() {
            return Err(RosterError::not_found(format!(
                "课程 {} 不存在",
                self.course_id
            )));
        }

        let rows = Self::parse_user_names(&self.data)?;

        let mut created = 0;
        let mut skipped = 0;
        let mut errors = Vec::new();

        for (row, user_name) in &rows {
            match self.process_row(storage, user_name).await {
                Ok(RowOutcome::Created) => created += 1,
                Ok(RowOutcome::Skipped) => skipped += 1,
                Err(message) => errors.push(ImportRowError {
                    row: *row,
                    user_name: user_name.clone(),
                    message,
                }),
            }
        }

        Ok(JobStatus::Completed {
            total: rows.len(),
            created,
            skipped,
            errors,
        })
    }

    async fn process_row(
        &self,
        storage: &dyn Storage,
        user_name: &str,
    ) -> std::result::Result<RowOutcome, String> {
        if user_name.is_empty() {
            return Err("用户名为空".to_string());
        }

        let human = storage
            .get_human_by_username(user_name)
            .await
            .map_err(|e| e.message().to_string())?
            .ok_or_else(|| format!("用户 {user_name} 不存在"))?;

        if storage
            .get_role_by_user_and_course(human.id, self.course_id)
            .await
            .map_err(|e| e.message().to_string())?
            .is_some()
        {
            return Ok(RowOutcome::Skipped);
        }

        let request = CreateRoleRequest {
            user_id: human.id,
            course_id: self.course_id,
            role_type: self.role_kind,
            grader_permission: GraderPermissionAttributes::default(),
        };

        match storage.create_role(request).await {
            Ok(_) => Ok(RowOutcome::Created),
            // 并发插入导致的唯一约束冲突按已存在处理
            Err(RosterError::Validation(_)) => Ok(RowOutcome::Skipped),
            Err(e) => {
                error!("创建课程角色失败 ({}): {}", user_name, e);
                Err(e.message().to_string())
            }
        }
    }
}
