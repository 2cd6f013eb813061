use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities::BidId,
        rfq::entities::RfqId,
    },
};

impl Repository {
    pub async fn contract_exists(&self, rfq_id: RfqId, bid_id: BidId) -> Result<bool, RestError> {
        self.db.contract_exists(rfq_id, bid_id).await
    }
}
