use {
    super::Repository,
    crate::{
        api::RestError,
        rfq::entities,
    },
};

impl Repository {
    /// Moves the rfq to `new_status` only if it is still in a status allowed to reach it.
    pub async fn update_rfq_status(
        &self,
        rfq_id: entities::RfqId,
        new_status: entities::RfqStatus,
    ) -> Result<entities::Rfq, RestError> {
        self.db
            .update_rfq_status(
                rfq_id,
                entities::RfqStatus::predecessors(new_status),
                new_status,
            )
            .await?
            .ok_or_else(|| {
                RestError::InvalidState(format!(
                    "RFQ status changed concurrently, cannot move it to {}",
                    new_status.as_ref()
                ))
            })
    }
}
