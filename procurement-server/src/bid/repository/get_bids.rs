use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities,
    },
};

impl Repository {
    pub async fn get_bids(
        &self,
        filter: entities::BidFilter,
    ) -> Result<Vec<entities::Bid>, RestError> {
        self.db.get_bids(filter).await
    }
}
