use {
    super::Repository,
    crate::{
        api::RestError,
        rfq::entities,
    },
};

impl Repository {
    pub async fn get_rfqs(
        &self,
        filter: entities::RfqFilter,
    ) -> Result<Vec<entities::Rfq>, RestError> {
        self.db.get_rfqs(filter).await
    }
}
