use {
    super::Service,
    crate::{
        api::RestError,
        contract::entities,
        models::Profile,
    },
};

#[derive(Debug, Clone)]
pub struct GetContractsInput {
    pub profile: Profile,
}

impl Service {
    /// Contracts the caller is a party to, newest first.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(profile_id = %input.profile.id))]
    pub async fn get_contracts(
        &self,
        input: GetContractsInput,
    ) -> Result<Vec<entities::Contract>, RestError> {
        let filter = if input.profile.is_vendor() {
            entities::ContractFilter {
                vendor_id: Some(input.profile.id),
                ..Default::default()
            }
        } else {
            entities::ContractFilter {
                customer_id: Some(input.profile.id),
                ..Default::default()
            }
        };
        self.repo.get_contracts(filter).await
    }
}
