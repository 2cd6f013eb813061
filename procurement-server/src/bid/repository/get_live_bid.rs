use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities,
        models::ProfileId,
        rfq::entities::RfqId,
    },
};

impl Repository {
    pub async fn get_live_bid(
        &self,
        rfq_id: RfqId,
        vendor_id: ProfileId,
    ) -> Result<Option<entities::Bid>, RestError> {
        self.db.get_live_bid(rfq_id, vendor_id).await
    }
}
