use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contractors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub contractor_name: String,
    pub po_number: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub department: String,
    pub job_description: Option<String>,
    pub hod_name: Option<String>,

    // Auto-attached from hod_signatures at registration time
    pub hod_signature_path: Option<String>,

    pub submitted_at: i64,
    pub status: String,

    // Capability token for unauthenticated status lookup
    #[sea_orm(unique)]
    pub access_token: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee::Entity")]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
