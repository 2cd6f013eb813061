use {
    super::Repository,
    crate::{
        api::RestError,
        rfq::entities,
    },
};

impl Repository {
    pub async fn get_rfq(&self, rfq_id: entities::RfqId) -> Result<entities::Rfq, RestError> {
        self.db.get_rfq(rfq_id).await?.ok_or(RestError::RfqNotFound)
    }
}
