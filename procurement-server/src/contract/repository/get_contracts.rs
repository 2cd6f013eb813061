use {
    super::Repository,
    crate::{
        api::RestError,
        contract::entities,
    },
};

impl Repository {
    pub async fn get_contracts(
        &self,
        filter: entities::ContractFilter,
    ) -> Result<Vec<entities::Contract>, RestError> {
        self.db.get_contracts(filter).await
    }
}
