use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities,
    },
};

impl Repository {
    /// Only a submitted bid can have its offer changed.
    pub async fn update_bid(&self, bid: &entities::Bid) -> Result<(), RestError> {
        if self
            .db
            .update_bid(bid, vec![entities::BidStatus::Submitted])
            .await?
        {
            Ok(())
        } else {
            Err(RestError::InvalidState(
                "Cannot update bid that is under review or processed".to_string(),
            ))
        }
    }
}
