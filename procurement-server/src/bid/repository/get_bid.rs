use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities,
    },
};

impl Repository {
    pub async fn get_bid(&self, bid_id: entities::BidId) -> Result<entities::Bid, RestError> {
        self.db.get_bid(bid_id).await?.ok_or(RestError::BidNotFound)
    }
}
