//! 助教评分权限实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grader_permissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub role_id: i64,
    pub manage_assessments: bool,
    pub manage_submissions: bool,
    pub run_tests: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::roles::Entity",
        from = "Column::RoleId",
        to = "super::roles::Column::Id"
    )]
    Role,
}

impl Related<super::roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grader_permission(self) -> crate::models::roles::entities::GraderPermission {
        crate::models::roles::entities::GraderPermission {
            id: self.id,
            role_id: self.role_id,
            manage_assessments: self.manage_assessments,
            manage_submissions: self.manage_submissions,
            run_tests: self.run_tests,
        }
    }
}
