use {
    super::{
        verification::verify_contract,
        Service,
    },
    crate::{
        api::RestError,
        contract::entities,
        models::Profile,
    },
    time::OffsetDateTime,
};

#[derive(Debug, Clone)]
pub struct UpdateContractInput {
    pub contract_id:     entities::ContractId,
    pub contract_update: entities::ContractUpdate,
    pub profile:         Profile,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(contract_id = %input.contract_id))]
    pub async fn update_contract(
        &self,
        input: UpdateContractInput,
    ) -> Result<entities::Contract, RestError> {
        let contract = self.repo.get_contract(input.contract_id).await?;
        if contract.customer_id != input.profile.id {
            return Err(RestError::Forbidden);
        }
        if contract.status != entities::ContractStatus::Draft {
            return Err(RestError::InvalidState(format!(
                "Cannot update a contract that is {}",
                contract.status.as_ref()
            )));
        }
        let updated = input
            .contract_update
            .merge(&contract, OffsetDateTime::now_utc());
        verify_contract(&updated)?;
        self.repo.update_contract(&updated).await?;
        Ok(updated)
    }
}
