use serde::{Deserialize, Serialize};

/// 导入失败的行
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportRowError {
    pub row: usize,
    pub user_name: String,
    pub message: String,
}

/// 后台任务状态
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Completed {
        total: usize,
        created: usize,
        skipped: usize,
        errors: Vec<ImportRowError>,
    },
    Failed {
        message: String,
    },
}

impl JobStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, JobStatus::Completed { .. } | JobStatus::Failed { .. })
    }
}

/// 任务记录，仅发起人可查询
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub job_name: String,
    pub course_id: i64,
    pub requested_by: i64,
    #[serde(flatten)]
    pub status: JobStatus,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
