use {
    super::Repository,
    crate::{
        api::RestError,
        rfq::entities,
    },
};

/// Statuses in which the rfq details can still be edited.
pub const EDITABLE_STATUSES: [entities::RfqStatus; 2] =
    [entities::RfqStatus::Open, entities::RfqStatus::Closed];

impl Repository {
    pub async fn update_rfq(&self, rfq: &entities::Rfq) -> Result<(), RestError> {
        if self.db.update_rfq(rfq, EDITABLE_STATUSES.to_vec()).await? {
            Ok(())
        } else {
            Err(RestError::InvalidState(
                "RFQ can no longer be updated".to_string(),
            ))
        }
    }
}
