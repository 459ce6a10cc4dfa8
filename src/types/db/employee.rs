use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub contractor_id: String,

    // Identity
    pub first_name: String,
    pub middle_name: Option<String>,
    pub surname: String,
    pub dob: Option<String>,
    pub father_name: Option<String>,
    pub aadhar: Option<String>,
    pub mobile: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_mobile: Option<String>,
    pub address_present: Option<String>,
    pub address_permanent: Option<String>,

    // Assets (paths into the upload root, immutable shared reads)
    pub photo_path: Option<String>,
    pub signature_path: Option<String>,

    pub submitted_at: i64,

    // Derived: approved iff all three tracks approved, rejected if any rejected
    pub final_status: String,

    pub hr_status: String,
    pub hr_approved_by: Option<String>,
    pub hr_approved_at: Option<i64>,
    pub hr_signature_path: Option<String>,

    pub medical_status: String,
    pub medical_approved_by: Option<String>,
    pub medical_approved_at: Option<i64>,
    pub medical_signature_path: Option<String>,

    pub safety_status: String,
    pub safety_approved_by: Option<String>,
    pub safety_approved_at: Option<i64>,
    pub safety_signature_path: Option<String>,

    pub system_signature_path: Option<String>,
    pub reject_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contractor::Entity",
        from = "Column::ContractorId",
        to = "super::contractor::Column::Id",
        on_delete = "Cascade"
    )]
    Contractor,
    #[sea_orm(has_one = "super::idcard::Entity")]
    IdCard,
}

impl Related<super::contractor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contractor.def()
    }
}

impl Related<super::idcard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IdCard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
