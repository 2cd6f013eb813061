use {
    super::Service,
    crate::{
        api::RestError,
        bid::entities,
        models::Profile,
        rfq::service::get_rfq::GetRfqInput,
    },
};

pub struct GetBidInput {
    pub bid_id:  entities::BidId,
    pub profile: Profile,
}

pub struct GetBidByIdInput {
    pub bid_id: entities::BidId,
}

impl Service {
    /// Visible to the vendor who placed the bid and to the owner of its rfq.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(bid_id = %input.bid_id))]
    pub async fn get_bid(&self, input: GetBidInput) -> Result<entities::Bid, RestError> {
        let bid = self.repo.get_bid(input.bid_id).await?;
        if bid.is_owned_by(input.profile.id) {
            return Ok(bid);
        }
        let rfq = self
            .rfq_service
            .get_rfq(GetRfqInput { rfq_id: bid.rfq_id })
            .await?;
        if rfq.is_owned_by(input.profile.id) {
            Ok(bid)
        } else {
            Err(RestError::Forbidden)
        }
    }

    /// Fetches the bid without checking who is asking.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(bid_id = %input.bid_id))]
    pub async fn get_bid_by_id(&self, input: GetBidByIdInput) -> Result<entities::Bid, RestError> {
        self.repo.get_bid(input.bid_id).await
    }
}
