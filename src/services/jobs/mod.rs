pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::jobs::JobQueue;

pub struct JobService;

impl JobService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_job_queue(&self, request: &HttpRequest) -> Option<JobQueue> {
        request
            .app_data::<web::Data<JobQueue>>()
            .map(|queue| queue.get_ref().clone())
    }

    // 查询任务状态
    pub async fn get_status(&self, job_id: &str, request: &HttpRequest) -> ActixResult<HttpResponse> {
        status::get_status(self, job_id, request).await
    }
}
