use {
    super::Service,
    crate::{
        api::RestError,
        rfq::entities,
    },
};

pub struct GetRfqInput {
    pub rfq_id: entities::RfqId,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(rfq_id = %input.rfq_id))]
    pub async fn get_rfq(&self, input: GetRfqInput) -> Result<entities::Rfq, RestError> {
        self.repo.get_rfq(input.rfq_id).await
    }
}
