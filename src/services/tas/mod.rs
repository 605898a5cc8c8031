pub mod create;
pub mod download;
pub mod list;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::jobs::JobQueue;
use crate::models::roles::requests::CreateTaRequest;
use crate::storage::Storage;

pub use download::RosterFormat;

pub struct TaService {
    storage: Option<Arc<dyn Storage>>,
}

impl TaService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_job_queue(&self, request: &HttpRequest) -> Option<JobQueue> {
        request
            .app_data::<web::Data<JobQueue>>()
            .map(|queue| queue.get_ref().clone())
    }

    // 列出课程助教
    pub async fn list_tas(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_tas(self, course_id, request).await
    }

    // 创建助教
    pub async fn create_ta(
        &self,
        course_id: i64,
        ta_data: CreateTaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_ta(self, course_id, ta_data, request).await
    }

    // 批量上传助教
    pub async fn upload_tas(
        &self,
        course_id: i64,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        upload::upload_tas(self, course_id, payload, request).await
    }

    // 下载助教名单
    pub async fn download_tas(
        &self,
        course_id: i64,
        format: Option<&str>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        download::download_tas(self, course_id, format, request).await
    }
}
