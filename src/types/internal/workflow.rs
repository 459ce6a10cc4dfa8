use std::fmt;

/// Status of a single review track, and of the derived final status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ApprovalStatus::Pending),
            "approved" => Some(ApprovalStatus::Approved),
            "rejected" => Some(ApprovalStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sequential review stages: HR gates Medical, Medical gates Safety
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStage {
    Hr,
    Medical,
    Safety,
}

impl ReviewStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStage::Hr => "hr",
            ReviewStage::Medical => "medical",
            ReviewStage::Safety => "safety",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hr" => Some(ReviewStage::Hr),
            "medical" => Some(ReviewStage::Medical),
            "safety" => Some(ReviewStage::Safety),
            _ => None,
        }
    }

    /// Default rejection reason recorded when the caller supplies none
    pub fn default_reject_reason(&self) -> &'static str {
        match self {
            ReviewStage::Hr => "Documents incomplete",
            ReviewStage::Medical => "Medical fitness issues",
            ReviewStage::Safety => "PPE or safety requirements not met",
        }
    }
}

impl fmt::Display for ReviewStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Combine the three track statuses into the derived final status.
///
/// Rejected wins over everything; approved requires all three tracks
/// approved; anything else stays pending.
pub fn derive_final_status(
    hr: ApprovalStatus,
    medical: ApprovalStatus,
    safety: ApprovalStatus,
) -> ApprovalStatus {
    if hr == ApprovalStatus::Rejected
        || medical == ApprovalStatus::Rejected
        || safety == ApprovalStatus::Rejected
    {
        ApprovalStatus::Rejected
    } else if hr == ApprovalStatus::Approved
        && medical == ApprovalStatus::Approved
        && safety == ApprovalStatus::Approved
    {
        ApprovalStatus::Approved
    } else {
        ApprovalStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApprovalStatus::*;

    #[test]
    fn final_status_is_approved_only_when_all_tracks_approved() {
        assert_eq!(derive_final_status(Approved, Approved, Approved), Approved);
        assert_eq!(derive_final_status(Approved, Approved, Pending), Pending);
        assert_eq!(derive_final_status(Pending, Approved, Approved), Pending);
        assert_eq!(derive_final_status(Approved, Pending, Approved), Pending);
    }

    #[test]
    fn any_rejection_makes_final_status_rejected() {
        assert_eq!(derive_final_status(Rejected, Pending, Pending), Rejected);
        assert_eq!(derive_final_status(Approved, Rejected, Pending), Rejected);
        assert_eq!(derive_final_status(Approved, Approved, Rejected), Rejected);
    }

    #[test]
    fn all_pending_stays_pending() {
        assert_eq!(derive_final_status(Pending, Pending, Pending), Pending);
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [Pending, Approved, Rejected] {
            assert_eq!(ApprovalStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApprovalStatus::parse("unknown"), None);
    }
}
