/// 业务错误码，随 `ApiResponse` 一起返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    InternalServerError = 1005,

    // 认证与授权
    Unauthorized = 2000,
    AuthFailed = 2001,
    PermissionDenied = 2003,

    // 用户
    UserNotFound = 3000,
    UserNameInvalid = 3001,
    UserAlreadyExists = 3002,
    UserUpdateFailed = 3003,

    // 课程与角色
    CourseNotFound = 4000,
    RoleHumanNotFound = 4100,
    RoleAlreadyExists = 4101,
    RoleCreationFailed = 4102,

    // 名单导入导出
    FileUploadFailed = 5000,
    FileTooLarge = 5001,
    ImportFileDataInvalid = 5002,
    ExportFormatUnsupported = 5003,
    ExportFailed = 5004,

    // 后台任务
    JobQueueFull = 6000,
    JobNotFound = 6001,
}
