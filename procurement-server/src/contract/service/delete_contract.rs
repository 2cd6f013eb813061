use {
    super::Service,
    crate::{
        api::RestError,
        contract::entities,
        models::Profile,
    },
};

#[derive(Debug, Clone)]
pub struct DeleteContractInput {
    pub contract_id: entities::ContractId,
    pub profile:     Profile,
}

impl Service {
    /// The awarded rfq and its bids keep their statuses.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(contract_id = %input.contract_id))]
    pub async fn delete_contract(&self, input: DeleteContractInput) -> Result<(), RestError> {
        let contract = self.repo.get_contract(input.contract_id).await?;
        if contract.customer_id != input.profile.id {
            return Err(RestError::Forbidden);
        }
        self.repo.delete_contract(contract.id).await?;
        tracing::info!(
            contract_number = contract.contract_number,
            "Contract deleted"
        );
        Ok(())
    }
}
