use std::sync::Arc;

use poem_openapi::param::Path;
use poem_openapi::payload::Attachment;
use poem_openapi::{OpenApi, Tags};

use crate::errors::ReviewError;
use crate::services::ApprovalService;

/// ID card download API endpoints.
///
/// Downloads are public: the employee id is only handed out on the
/// token-gated status page, and the card itself is meant for printing.
pub struct CardApi {
    approval: Arc<ApprovalService>,
}

impl CardApi {
    pub fn new(approval: Arc<ApprovalService>) -> Self {
        Self { approval }
    }
}

/// API tags for card endpoints
#[derive(Tags)]
enum CardTags {
    /// ID card downloads
    Cards,
}

#[OpenApi(prefix_path = "/cards")]
impl CardApi {
    /// Download the issued ID card PDF for an employee
    #[oai(path = "/:employee_id", method = "get", tag = "CardTags::Cards")]
    async fn download(
        &self,
        employee_id: Path<String>,
    ) -> Result<Attachment<Vec<u8>>, ReviewError> {
        let (_card, path) = self.approval.card_for_download(&employee_id.0).await?;

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            tracing::error!("Failed to read ID card PDF {}: {}", path.display(), e);
            ReviewError::internal_error("Failed to read ID card")
        })?;

        Ok(Attachment::new(bytes).filename(format!("idcard_{}.pdf", employee_id.0)))
    }
}
