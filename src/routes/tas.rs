use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireCourseRole, RequireJWT};
use crate::models::permissions::Action;
use crate::models::roles::requests::{CreateTaRequest, RosterDownloadParams};
use crate::services::TaService;
use crate::utils::SafeCourseIdI64;

// 懒加载的全局 TaService 实例
static TA_SERVICE: Lazy<TaService> = Lazy::new(TaService::new_lazy);

// HTTP处理程序
pub async fn list_tas(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    TA_SERVICE.list_tas(course_id.0, &req).await
}

pub async fn create_ta(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    ta_data: web::Json<CreateTaRequest>,
) -> ActixResult<HttpResponse> {
    TA_SERVICE
        .create_ta(course_id.0, ta_data.into_inner(), &req)
        .await
}

pub async fn upload_tas(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    TA_SERVICE.upload_tas(course_id.0, payload, &req).await
}

pub async fn download_tas(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    query: web::Query<RosterDownloadParams>,
) -> ActixResult<HttpResponse> {
    TA_SERVICE
        .download_tas(course_id.0, query.format.as_deref(), &req)
        .await
}

pub async fn download_tas_csv(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    TA_SERVICE.download_tas(course_id.0, Some("csv"), &req).await
}

pub async fn download_tas_yml(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    TA_SERVICE.download_tas(course_id.0, Some("yml"), &req).await
}

// 配置路由
pub fn configure_ta_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/courses/{course_id}/tas")
            .wrap(RequireJWT)
            .route(
                "",
                web::get()
                    .to(list_tas)
                    .wrap(RequireCourseRole::new(Action::ListTas)),
            )
            .route(
                "",
                web::post()
                    .to(create_ta)
                    .wrap(RequireCourseRole::new(Action::CreateTa)),
            )
            .route(
                "/upload",
                web::post()
                    .to(upload_tas)
                    .wrap(RequireCourseRole::new(Action::UploadTas)),
            )
            .route(
                "/download.csv",
                web::get()
                    .to(download_tas_csv)
                    .wrap(RequireCourseRole::new(Action::DownloadTas)),
            )
            .route(
                "/download.yml",
                web::get()
                    .to(download_tas_yml)
                    .wrap(RequireCourseRole::new(Action::DownloadTas)),
            )
            .route(
                "/download",
                web::get()
                    .to(download_tas)
                    .wrap(RequireCourseRole::new(Action::DownloadTas)),
            ),
    );
}
