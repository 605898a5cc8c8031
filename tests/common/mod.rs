//! 集成测试共享工具：独立的临时 SQLite 数据库、任务队列与数据构造函数

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rust_course_roster::jobs::JobQueue;
use rust_course_roster::models::courses::{entities::Course, requests::CreateCourseRequest};
use rust_course_roster::models::roles::{
    entities::{Role, RoleKind},
    requests::{CreateRoleRequest, GraderPermissionAttributes},
};
use rust_course_roster::models::users::{
    entities::{User, UserType},
    requests::CreateUserRequest,
};
use rust_course_roster::storage::Storage;
use rust_course_roster::storage::sea_orm_storage::SeaOrmStorage;
use rust_course_roster::utils::jwt::JwtUtils;

/// 用 [`TestContext`] 构造完整路由的测试服务
#[macro_export]
macro_rules! roster_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.storage.clone()))
                .app_data(actix_web::web::Data::new($ctx.jobs.clone()))
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(rust_course_roster::utils::json_error_handler),
                )
                .app_data(
                    actix_web::web::FormConfig::default()
                        .error_handler(rust_course_roster::utils::form_error_handler),
                )
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(rust_course_roster::utils::query_error_handler),
                )
                .configure(rust_course_roster::routes::configure_routes),
        )
        .await
    };
}

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub jobs: JobQueue,
    db_path: PathBuf,
}

impl TestContext {
    pub async fn new() -> Self {
        let db_path =
            std::env::temp_dir().join(format!("roster-test-{}.db", uuid::Uuid::new_v4()));
        let url = db_path.to_str().expect("temp dir path should be utf-8");
        let storage = SeaOrmStorage::connect(url, 5, 10)
            .await
            .expect("test database should open");
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let jobs = JobQueue::start(storage.clone(), 16, Duration::from_secs(600));

        Self {
            storage,
            jobs,
            db_path,
        }
    }

    pub async fn user(&self, user_name: &str, user_type: UserType) -> User {
        self.storage
            .create_user(CreateUserRequest {
                user_name: user_name.to_string(),
                email: Some(format!("{user_name}@example.com")),
                id_number: None,
                user_type,
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                password: None,
            })
            .await
            .expect("create user")
    }

    pub async fn person(
        &self,
        user_name: &str,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
    ) -> User {
        self.storage
            .create_user(CreateUserRequest {
                user_name: user_name.to_string(),
                email: email.map(str::to_string),
                id_number: None,
                user_type: UserType::EndUser,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                password: None,
            })
            .await
            .expect("create user")
    }

    pub async fn course(&self, name: &str) -> Course {
        self.storage
            .create_course(CreateCourseRequest {
                name: name.to_string(),
                display_name: name.to_uppercase(),
                is_hidden: false,
            })
            .await
            .expect("create course")
    }

    pub async fn role(&self, user: &User, course: &Course, kind: RoleKind) -> Role {
        self.storage
            .create_role(CreateRoleRequest {
                user_id: user.id,
                course_id: course.id,
                role_type: kind,
                grader_permission: GraderPermissionAttributes::default(),
            })
            .await
            .expect("create role")
    }

    /// 创建一门课程及其教师
    pub async fn course_with_instructor(&self, name: &str) -> (Course, User) {
        let course = self.course(name).await;
        let instructor = self.user(&format!("{name}_instructor"), UserType::EndUser).await;
        self.role(&instructor, &course, RoleKind::Instructor).await;
        (course, instructor)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut path = self.db_path.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

/// `Authorization` 请求头
pub fn bearer(user: &User) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user.id, user.user_type.as_str())
        .expect("token should be generated");
    ("Authorization", format!("Bearer {token}"))
}

const BOUNDARY: &str = "----roster-test-boundary";

/// 单文件 multipart 表单，返回 (Content-Type, body)
pub fn multipart_file(field: &str, file_name: &str, content: &str) -> (String, String) {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/csv\r\n\
         \r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
