use {
    super::Repository,
    crate::{
        api::RestError,
        contract::entities,
    },
};

impl Repository {
    pub async fn get_contract(
        &self,
        contract_id: entities::ContractId,
    ) -> Result<entities::Contract, RestError> {
        self.db
            .get_contract(contract_id)
            .await?
            .ok_or(RestError::ContractNotFound)
    }
}
