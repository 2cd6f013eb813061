use {
    super::Repository,
    crate::{
        api::RestError,
        contract::entities,
    },
};

impl Repository {
    pub async fn delete_contract(&self, contract_id: entities::ContractId) -> Result<(), RestError> {
        if self.db.delete_contract(contract_id).await? {
            Ok(())
        } else {
            Err(RestError::ContractNotFound)
        }
    }
}
