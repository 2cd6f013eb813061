use {
    super::Repository,
    crate::{
        api::RestError,
        rfq::entities,
    },
};

impl Repository {
    pub async fn delete_rfq(&self, rfq_id: entities::RfqId) -> Result<(), RestError> {
        if self.db.delete_rfq(rfq_id).await? {
            Ok(())
        } else {
            Err(RestError::RfqNotFound)
        }
    }
}
