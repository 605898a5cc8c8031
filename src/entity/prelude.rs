//! 预导入模块，方便使用

pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::grader_permissions::{
    ActiveModel as GraderPermissionActiveModel, Entity as GraderPermissions,
    Model as GraderPermissionModel,
};
pub use super::roles::{ActiveModel as RoleActiveModel, Entity as Roles, Model as RoleModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
