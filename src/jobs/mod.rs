//! 进程内后台任务队列
//!
//! 请求处理器通过 [`JobQueue::enqueue`] 把任务放入有界 mpsc 通道后立即返回，
//! 由启动时派生的单个 worker 顺序执行。任务状态保存在带 TTL 的 moka 缓存中，
//! 只有发起人可以查询。

pub mod upload_roles;

pub use upload_roles::UploadRolesJob;

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{error, info, warn};

use crate::errors::{Result, RosterError};
use crate::models::jobs::entities::{JobRecord, JobStatus};
use crate::storage::Storage;

struct QueuedJob {
    job_id: String,
    job: UploadRolesJob,
}

#[derive(Clone)]
pub struct JobQueue {
    sender: mpsc::Sender<QueuedJob>,
    statuses: Cache<String, JobRecord>,
}

impl JobQueue {
    /// 创建队列并派生 worker，必须在 tokio 运行时内调用
    pub fn start(storage: Arc<dyn Storage>, capacity: usize, status_ttl: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let statuses = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(status_ttl)
            .build();

        tokio::spawn(run_worker(receiver, storage, statuses.clone()));
        info!("Job worker started, queue capacity: {}", capacity.max(1));

        Self { sender, statuses }
    }

    /// 入队，返回任务 ID；队列已满时返回 JobQueue 错误
    pub async fn enqueue(&self, job: UploadRolesJob, requested_by: i64) -> Result<String> {
        let job_id = uuid::Uuid::new_v4().to_string();
        let record = JobRecord {
            job_id: job_id.clone(),
            job_name: UploadRolesJob::NAME.to_string(),
            course_id: job.course_id,
            requested_by,
            status: JobStatus::Queued,
            updated_at: chrono::Utc::now(),
        };
        self.statuses.insert(job_id.clone(), record).await;

        let queued = QueuedJob {
            job_id: job_id.clone(),
            job,
        };
        match self.sender.try_send(queued) {
            Ok(()) => Ok(job_id),
            Err(TrySendError::Full(_)) => {
                self.statuses.invalidate(&job_id).await;
                warn!("Job queue is full, rejecting job for user {}", requested_by);
                Err(RosterError::job_queue("任务队列已满，请稍后重试"))
            }
            Err(TrySendError::Closed(_)) => {
                self.statuses.invalidate(&job_id).await;
                error!("Job worker has stopped, queue closed");
                Err(RosterError::job_queue("任务队列已关闭"))
            }
        }
    }

    /// 查询任务状态
    pub async fn status(&self, job_id: &str) -> Option<JobRecord> {
        self.statuses.get(job_id).await
    }
}

async fn set_status(statuses: &Cache<String, JobRecord>, job_id: &str, status: JobStatus) {
    if let Some(mut record) = statuses.get(job_id).await {
        record.status = status;
        record.updated_at = chrono::Utc::now();
        statuses.insert(job_id.to_string(), record).await;
    }
}

async fn run_worker(
    mut receiver: mpsc::Receiver<QueuedJob>,
    storage: Arc<dyn Storage>,
    statuses: Cache<String, JobRecord>,
) {
    while let Some(QueuedJob { job_id, job }) = receiver.recv().await {
        info!(
            "Running {} {} for course {}",
            UploadRolesJob::NAME,
            job_id,
            job.course_id
        );
        set_status(&statuses, &job_id, JobStatus::Running).await;

        let status = job.perform(storage.as_ref()).await;
        match &status {
            JobStatus::Completed {
                total,
                created,
                skipped,
                errors,
            } => info!(
                "Job {} completed: total={}, created={}, skipped={}, errors={}",
                job_id,
                total,
                created,
                skipped,
                errors.len()
            ),
            JobStatus::Failed { message } => warn!("Job {} failed: {}", job_id, message),
            _ => {}
        }
        set_status(&statuses, &job_id, status).await;
    }
    warn!("Job worker stopped: all senders dropped");
}
