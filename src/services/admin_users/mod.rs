pub mod edit;
pub mod list;
pub mod update;

use actix_web::http::header::ACCEPT;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::{UpdateUserParams, UserFormSubmission};
use crate::storage::Storage;

/// 管理页面的响应格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Html,
    Json,
}

impl ResponseFormat {
    /// 显式的 format 参数优先，其次看 Accept 头，默认 HTML
    pub fn negotiate(format: Option<&str>, request: &HttpRequest) -> Result<Self, String> {
        match format.map(str::trim).filter(|f| !f.is_empty()) {
            Some(f) if f.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(f) if f.eq_ignore_ascii_case("html") => Ok(Self::Html),
            Some(f) => Err(format!("Unsupported format: {f}")),
            None => {
                let accept = request
                    .headers()
                    .get(ACCEPT)
                    .and_then(|h| h.to_str().ok())
                    .unwrap_or_default();
                if accept.contains("application/json") && !accept.contains("text/html") {
                    Ok(Self::Json)
                } else {
                    Ok(Self::Html)
                }
            }
        }
    }
}

pub struct AdminUserService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdminUserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取用户列表
    pub async fn list_users(
        &self,
        format: Option<&str>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, format, request).await
    }

    // 用户编辑表单
    pub async fn edit_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        edit::edit_user(self, user_id, request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: i64,
        params: UpdateUserParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, params, request).await
    }

    // 编辑页表单提交
    pub async fn submit_user_form(
        &self,
        user_id: i64,
        form: UserFormSubmission,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::submit_user_form(self, user_id, form, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_format_param_wins() {
        let req = TestRequest::default()
            .insert_header((ACCEPT, "text/html"))
            .to_http_request();
        assert_eq!(
            ResponseFormat::negotiate(Some("json"), &req),
            Ok(ResponseFormat::Json)
        );
    }

    #[test]
    fn test_accept_header() {
        let req = TestRequest::default()
            .insert_header((ACCEPT, "application/json"))
            .to_http_request();
        assert_eq!(
            ResponseFormat::negotiate(None, &req),
            Ok(ResponseFormat::Json)
        );

        let req = TestRequest::default().to_http_request();
        assert_eq!(
            ResponseFormat::negotiate(None, &req),
            Ok(ResponseFormat::Html)
        );
    }

    #[test]
    fn test_unknown_format() {
        let req = TestRequest::default().to_http_request();
        assert!(ResponseFormat::negotiate(Some("xml"), &req).is_err());
    }
}
