use {
    super::Service,
    crate::{
        api::RestError,
        models::Profile,
        rfq::entities,
    },
};

pub struct GetMyRfqsInput {
    pub profile: Profile,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(profile_id = %input.profile.id))]
    pub async fn get_my_rfqs(&self, input: GetMyRfqsInput) -> Result<Vec<entities::Rfq>, RestError> {
        if !input.profile.is_customer() {
            return Err(RestError::Forbidden);
        }
        self.repo
            .get_rfqs(entities::RfqFilter {
                customer_id: Some(input.profile.id),
                ..Default::default()
            })
            .await
    }
}
