use {
    super::Service,
    crate::{
        api::RestError,
        bid::entities,
        models::Profile,
    },
};

#[derive(Debug, Clone)]
pub struct WithdrawBidInput {
    pub bid_id:  entities::BidId,
    pub profile: Profile,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(bid_id = %input.bid_id))]
    pub async fn withdraw_bid(&self, input: WithdrawBidInput) -> Result<entities::Bid, RestError> {
        let bid = self.repo.get_bid(input.bid_id).await?;
        if !bid.is_owned_by(input.profile.id) {
            return Err(RestError::Forbidden);
        }
        bid.status.check_transition(entities::BidStatus::Withdrawn)?;
        self.repo
            .update_bid_status(bid.id, entities::BidStatus::Withdrawn)
            .await
    }
}
