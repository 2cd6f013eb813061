use {
    super::Repository,
    crate::{
        api::RestError,
        rfq::entities,
    },
};

impl Repository {
    pub async fn get_rfq_references(
        &self,
        rfq_id: entities::RfqId,
    ) -> Result<entities::RfqReferences, RestError> {
        self.db.get_rfq_references(rfq_id).await
    }
}
