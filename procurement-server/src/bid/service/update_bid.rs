use {
    super::{
        verification::verify_bid_update,
        Service,
    },
    crate::{
        api::RestError,
        bid::entities,
        models::Profile,
    },
    time::OffsetDateTime,
};

#[derive(Debug, Clone)]
pub struct UpdateBidInput {
    pub bid_id:     entities::BidId,
    pub bid_update: entities::BidUpdate,
    pub profile:    Profile,
}

impl Service {
    /// The rfq of a bid never changes and its bidding window is not checked again.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(bid_id = %input.bid_id))]
    pub async fn update_bid(&self, input: UpdateBidInput) -> Result<entities::Bid, RestError> {
        let bid = self.repo.get_bid(input.bid_id).await?;
        if !bid.is_owned_by(input.profile.id) {
            return Err(RestError::Forbidden);
        }
        if bid.status != entities::BidStatus::Submitted {
            return Err(RestError::InvalidState(
                "Cannot update bid that is under review or processed".to_string(),
            ));
        }
        verify_bid_update(&input.bid_update)?;

        let merged = input.bid_update.merge(&bid, OffsetDateTime::now_utc());
        self.repo.update_bid(&merged).await?;
        Ok(merged)
    }
}
