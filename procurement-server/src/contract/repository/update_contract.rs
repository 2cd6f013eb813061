use {
    super::Repository,
    crate::{
        api::RestError,
        contract::entities,
    },
};

pub const EDITABLE_STATUSES: [entities::ContractStatus; 1] = [entities::ContractStatus::Draft];

impl Repository {
    pub async fn update_contract(&self, contract: &entities::Contract) -> Result<(), RestError> {
        if self
            .db
            .update_contract(contract, EDITABLE_STATUSES.to_vec())
            .await?
        {
            Ok(())
        } else {
            Err(RestError::InvalidState(
                "Only draft contracts can be updated".to_string(),
            ))
        }
    }
}
