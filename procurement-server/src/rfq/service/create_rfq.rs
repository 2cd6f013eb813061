use {
    super::{
        verification::verify_rfq_create,
        Service,
    },
    crate::{
        api::RestError,
        kernel::entities::start_of_today,
        models::Profile,
        rfq::entities,
    },
};

#[derive(Debug, Clone)]
pub struct CreateRfqInput {
    pub rfq_create: entities::RfqCreate,
    pub profile:    Profile,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(rfq_id))]
    pub async fn create_rfq(&self, input: CreateRfqInput) -> Result<entities::Rfq, RestError> {
        if !input.profile.is_customer() {
            return Err(RestError::Forbidden);
        }
        verify_rfq_create(&input.rfq_create, start_of_today())?;
        let rfq = self.repo.add_rfq(input.rfq_create, &input.profile).await?;
        tracing::Span::current().record("rfq_id", rfq.id.to_string());
        tracing::info!(rfq_number = rfq.rfq_number, "RFQ created");
        Ok(rfq)
    }
}
