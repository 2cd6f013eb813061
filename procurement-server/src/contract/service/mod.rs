#[double]
use crate::bid::service::Service as BidService;
#[double]
use crate::rfq::service::Service as RfqService;
use {
    super::repository::{
        Database,
        Repository,
    },
    mockall_double::double,
    std::sync::Arc,
};
#[cfg(test)]
use {
    super::entities,
    crate::{
        api::RestError,
        kernel::db::DB,
    },
    mockall::mock,
};

pub mod create_contract;
pub mod delete_contract;
pub mod get_contract;
pub mod get_contracts;
pub mod update_contract;
pub mod update_contract_status;
mod verification;

pub struct ServiceInner {
    repo:        Repository,
    rfq_service: Arc<RfqService>,
    bid_service: Arc<BidService>,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(
        db: impl Database,
        rfq_service: Arc<RfqService>,
        bid_service: Arc<BidService>,
    ) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Repository::new(db),
            rfq_service,
            bid_service,
        }))
    }
}


#[cfg(test)]
mock! {
    pub Service {
        pub fn new(db: DB, rfq_service: Arc<RfqService>, bid_service: Arc<BidService>) -> Self;
        pub async fn create_contract(&self, input: create_contract::CreateContractInput) -> Result<entities::Award, RestError>;
        pub async fn update_contract(&self, input: update_contract::UpdateContractInput) -> Result<entities::Contract, RestError>;
        pub async fn update_contract_status(&self, input: update_contract_status::UpdateContractStatusInput) -> Result<entities::Contract, RestError>;
        pub async fn delete_contract(&self, input: delete_contract::DeleteContractInput) -> Result<(), RestError>;
        pub async fn get_contract(&self, input: get_contract::GetContractInput) -> Result<entities::Contract, RestError>;
        pub async fn get_contracts(&self, input: get_contracts::GetContractsInput) -> Result<Vec<entities::Contract>, RestError>;
    }
}
