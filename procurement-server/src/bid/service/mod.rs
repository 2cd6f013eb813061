#[double]
use crate::rfq::service::Service as RfqService;
use {
    super::repository::{
        Database,
        Repository,
    },
    crate::config::LifecycleConfig,
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

pub mod create_bid;
pub mod get_bid;
pub mod get_bids_by_rfq;
pub mod get_my_bids;
pub mod update_bid;
pub mod update_bid_status;
pub mod withdraw_bid;
mod verification;

pub struct ServiceInner {
    repo:        Repository,
    rfq_service: Arc<RfqService>,
    config:      LifecycleConfig,
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
    pub fn new(db: impl Database, rfq_service: Arc<RfqService>, config: LifecycleConfig) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Repository::new(db),
            rfq_service,
            config,
        }))
    }
}


#[cfg(test)]
mock! {
    pub Service {
        pub fn new(db: DB, rfq_service: Arc<RfqService>, config: LifecycleConfig) -> Self;
        pub async fn create_bid(&self, input: create_bid::CreateBidInput) -> Result<entities::Bid, RestError>;
        pub async fn update_bid(&self, input: update_bid::UpdateBidInput) -> Result<entities::Bid, RestError>;
        pub async fn update_bid_status(&self, input: update_bid_status::UpdateBidStatusInput) -> Result<entities::Bid, RestError>;
        pub async fn withdraw_bid(&self, input: withdraw_bid::WithdrawBidInput) -> Result<entities::Bid, RestError>;
        pub async fn get_bid(&self, input: get_bid::GetBidInput) -> Result<entities::Bid, RestError>;
        pub async fn get_bid_by_id(&self, input: get_bid::GetBidByIdInput) -> Result<entities::Bid, RestError>;
        pub async fn get_bids_by_rfq(&self, input: get_bids_by_rfq::GetBidsByRfqInput) -> Result<Vec<entities::Bid>, RestError>;
        pub async fn get_my_bids(&self, input: get_my_bids::GetMyBidsInput) -> Result<Vec<entities::VendorBid>, RestError>;
    }
}
