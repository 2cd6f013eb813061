use {
    super::{
        verification::verify_rfq_update,
        Service,
    },
    crate::{
        api::RestError,
        kernel::entities::start_of_today,
        models::Profile,
        rfq::entities,
    },
    time::OffsetDateTime,
};

#[derive(Debug, Clone)]
pub struct UpdateRfqInput {
    pub rfq_id:     entities::RfqId,
    pub rfq_update: entities::RfqUpdate,
    pub profile:    Profile,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(rfq_id = %input.rfq_id))]
    pub async fn update_rfq(&self, input: UpdateRfqInput) -> Result<entities::Rfq, RestError> {
        let rfq = self.repo.get_rfq(input.rfq_id).await?;
        if !rfq.is_owned_by(input.profile.id) {
            return Err(RestError::Forbidden);
        }
        if rfq.status.is_terminal() {
            return Err(RestError::InvalidState(format!(
                "Cannot update an RFQ that is {}",
                rfq.status.as_ref()
            )));
        }

        let merged = input
            .rfq_update
            .clone()
            .merge(&rfq, OffsetDateTime::now_utc());
        verify_rfq_update(&input.rfq_update, &merged, start_of_today())?;
        self.repo.update_rfq(&merged).await?;
        Ok(merged)
    }
}
