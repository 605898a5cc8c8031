use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireJWT;
use crate::services::JobService;
use crate::utils::SafeJobId;

// 懒加载的全局 JobService 实例
static JOB_SERVICE: Lazy<JobService> = Lazy::new(JobService::new_lazy);

pub async fn get_job_status(req: HttpRequest, job_id: SafeJobId) -> ActixResult<HttpResponse> {
    JOB_SERVICE.get_status(&job_id.0, &req).await
}

// 配置路由
pub fn configure_job_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/jobs")
            .wrap(RequireJWT)
            .route("/{job_id}", web::get().to(get_job_status)),
    );
}
