use serde::Serialize;

// 入队成功响应
#[derive(Debug, Serialize)]
pub struct JobEnqueuedResponse {
    pub job_id: String,
}
