use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create contractors table
        manager
            .create_table(
                Table::create()
                    .table(Contractors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Contractors::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Contractors::ContractorName).string().not_null())
                    .col(ColumnDef::new(Contractors::PoNumber).string())
                    .col(ColumnDef::new(Contractors::Email).string())
                    .col(ColumnDef::new(Contractors::Mobile).string())
                    .col(ColumnDef::new(Contractors::Department).string().not_null())
                    .col(ColumnDef::new(Contractors::JobDescription).string())
                    .col(ColumnDef::new(Contractors::HodName).string())
                    .col(ColumnDef::new(Contractors::HodSignaturePath).string())
                    .col(ColumnDef::new(Contractors::SubmittedAt).big_integer().not_null())
                    .col(ColumnDef::new(Contractors::Status).string().not_null().default("pending"))
                    .col(ColumnDef::new(Contractors::AccessToken).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contractors_access_token")
                    .table(Contractors::Table)
                    .col(Contractors::AccessToken)
                    .to_owned(),
            )
            .await?;

        // Create employees table
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employees::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Employees::ContractorId).string().not_null())
                    .col(ColumnDef::new(Employees::FirstName).string().not_null())
                    .col(ColumnDef::new(Employees::MiddleName).string())
                    .col(ColumnDef::new(Employees::Surname).string().not_null())
                    .col(ColumnDef::new(Employees::Dob).string())
                    .col(ColumnDef::new(Employees::FatherName).string())
                    .col(ColumnDef::new(Employees::Aadhar).string())
                    .col(ColumnDef::new(Employees::Mobile).string())
                    .col(ColumnDef::new(Employees::EmergencyContact).string())
                    .col(ColumnDef::new(Employees::EmergencyMobile).string())
                    .col(ColumnDef::new(Employees::AddressPresent).string())
                    .col(ColumnDef::new(Employees::AddressPermanent).string())
                    .col(ColumnDef::new(Employees::PhotoPath).string())
                    .col(ColumnDef::new(Employees::SignaturePath).string())
                    .col(ColumnDef::new(Employees::SubmittedAt).big_integer().not_null())
                    .col(ColumnDef::new(Employees::FinalStatus).string().not_null().default("pending"))
                    .col(ColumnDef::new(Employees::HrStatus).string().not_null().default("pending"))
                    .col(ColumnDef::new(Employees::HrApprovedBy).string())
                    .col(ColumnDef::new(Employees::HrApprovedAt).big_integer())
                    .col(ColumnDef::new(Employees::HrSignaturePath).string())
                    .col(ColumnDef::new(Employees::MedicalStatus).string().not_null().default("pending"))
                    .col(ColumnDef::new(Employees::MedicalApprovedBy).string())
                    .col(ColumnDef::new(Employees::MedicalApprovedAt).big_integer())
                    .col(ColumnDef::new(Employees::MedicalSignaturePath).string())
                    .col(ColumnDef::new(Employees::SafetyStatus).string().not_null().default("pending"))
                    .col(ColumnDef::new(Employees::SafetyApprovedBy).string())
                    .col(ColumnDef::new(Employees::SafetyApprovedAt).big_integer())
                    .col(ColumnDef::new(Employees::SafetySignaturePath).string())
                    .col(ColumnDef::new(Employees::SystemSignaturePath).string())
                    .col(ColumnDef::new(Employees::RejectReason).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_contractor_id")
                            .from(Employees::Table, Employees::ContractorId)
                            .to(Contractors::Table, Contractors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_contractor_id")
                    .table(Employees::Table)
                    .col(Employees::ContractorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_hr_status")
                    .table(Employees::Table)
                    .col(Employees::HrStatus)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_medical_status")
                    .table(Employees::Table)
                    .col(Employees::MedicalStatus)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_safety_status")
                    .table(Employees::Table)
                    .col(Employees::SafetyStatus)
                    .to_owned(),
            )
            .await?;

        // Create signatures table (role-keyed singletons: HR, SYSTEM)
        manager
            .create_table(
                Table::create()
                    .table(Signatures::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Signatures::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Signatures::Role).string().not_null().unique_key())
                    .col(ColumnDef::new(Signatures::FilePath).string().not_null())
                    .col(ColumnDef::new(Signatures::UploadedBy).string())
                    .col(ColumnDef::new(Signatures::UploadedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create idcards table (one row per employee)
        manager
            .create_table(
                Table::create()
                    .table(IdCards::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(IdCards::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(IdCards::EmployeeId).string().not_null().unique_key())
                    .col(ColumnDef::new(IdCards::PdfPath).string().not_null())
                    .col(ColumnDef::new(IdCards::IssuedAt).big_integer().not_null())
                    .col(ColumnDef::new(IdCards::ValidTill).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_idcards_employee_id")
                            .from(IdCards::Table, IdCards::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_idcards_employee_id")
                    .table(IdCards::Table)
                    .col(IdCards::EmployeeId)
                    .to_owned(),
            )
            .await?;

        // Create hod_signatures table (one per department)
        manager
            .create_table(
                Table::create()
                    .table(HodSignatures::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(HodSignatures::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(HodSignatures::Department).string().not_null().unique_key())
                    .col(ColumnDef::new(HodSignatures::HodName).string().not_null())
                    .col(ColumnDef::new(HodSignatures::SignaturePath).string().not_null())
                    .col(ColumnDef::new(HodSignatures::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(HodSignatures::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hod_signatures_department")
                    .table(HodSignatures::Table)
                    .col(HodSignatures::Department)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IdCards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contractors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Signatures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HodSignatures::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Contractors {
    Table,
    Id,
    ContractorName,
    PoNumber,
    Email,
    Mobile,
    Department,
    JobDescription,
    HodName,
    HodSignaturePath,
    SubmittedAt,
    Status,
    AccessToken,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    ContractorId,
    FirstName,
    MiddleName,
    Surname,
    Dob,
    FatherName,
    Aadhar,
    Mobile,
    EmergencyContact,
    EmergencyMobile,
    AddressPresent,
    AddressPermanent,
    PhotoPath,
    SignaturePath,
    SubmittedAt,
    FinalStatus,
    HrStatus,
    HrApprovedBy,
    HrApprovedAt,
    HrSignaturePath,
    MedicalStatus,
    MedicalApprovedBy,
    MedicalApprovedAt,
    MedicalSignaturePath,
    SafetyStatus,
    SafetyApprovedBy,
    SafetyApprovedAt,
    SafetySignaturePath,
    SystemSignaturePath,
    RejectReason,
}

#[derive(DeriveIden)]
enum Signatures {
    Table,
    Id,
    Role,
    FilePath,
    UploadedBy,
    UploadedAt,
}

#[derive(DeriveIden)]
enum IdCards {
    #[sea_orm(iden = "idcards")]
    Table,
    Id,
    EmployeeId,
    PdfPath,
    IssuedAt,
    ValidTill,
}

#[derive(DeriveIden)]
enum HodSignatures {
    Table,
    Id,
    Department,
    HodName,
    SignaturePath,
    CreatedAt,
    UpdatedAt,
}
