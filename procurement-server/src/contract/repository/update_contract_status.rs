use {
    super::Repository,
    crate::{
        api::RestError,
        contract::entities,
    },
};

impl Repository {
    pub async fn update_contract_status(
        &self,
        contract_id: entities::ContractId,
        new_status: entities::ContractStatus,
    ) -> Result<entities::Contract, RestError> {
        self.db
            .update_contract_status(
                contract_id,
                entities::ContractStatus::predecessors(new_status),
                new_status,
            )
            .await?
            .ok_or_else(|| {
                RestError::InvalidState(format!(
                    "Contract status changed concurrently, cannot move it to {}",
                    new_status.as_ref()
                ))
            })
    }
}
