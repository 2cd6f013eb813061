use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities,
    },
};

impl Repository {
    pub async fn update_bid_status(
        &self,
        bid_id: entities::BidId,
        new_status: entities::BidStatus,
    ) -> Result<entities::Bid, RestError> {
        self.db
            .update_bid_status(
                bid_id,
                entities::BidStatus::predecessors(new_status),
                new_status,
            )
            .await?
            .ok_or_else(|| {
                RestError::InvalidState(format!(
                    "Bid status changed concurrently, cannot move it to {}",
                    new_status.as_ref()
                ))
            })
    }
}
