use {
    super::repository::{
        Database,
        Repository,
    },
    crate::config::LifecycleConfig,
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

pub mod cancel_rfq;
pub mod close_rfq;
pub mod create_rfq;
pub mod delete_rfq;
pub mod get_my_rfqs;
pub mod get_open_rfqs;
pub mod get_rfq;
pub mod get_rfqs;
pub mod update_rfq;
mod verification;

pub struct ServiceInner {
    repo:   Repository,
    config: LifecycleConfig,
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
    pub fn new(db: impl Database, config: LifecycleConfig) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Repository::new(db),
            config,
        }))
    }
}

#[cfg(test)]
pub mod tests {
    use {
        super::*,
        crate::rfq::repository::MockDatabase,
    };

    impl Service {
        pub fn new_with_mocks(db: MockDatabase, config: LifecycleConfig) -> Self {
            Service::new(db, config)
        }
    }
}

#[cfg(test)]
mock! {
    pub Service {
        pub fn new(db: DB, config: LifecycleConfig) -> Self;
        pub async fn create_rfq(&self, input: create_rfq::CreateRfqInput) -> Result<entities::Rfq, RestError>;
        pub async fn update_rfq(&self, input: update_rfq::UpdateRfqInput) -> Result<entities::Rfq, RestError>;
        pub async fn close_rfq(&self, input: close_rfq::CloseRfqInput) -> Result<entities::Rfq, RestError>;
        pub async fn cancel_rfq(&self, input: cancel_rfq::CancelRfqInput) -> Result<entities::Rfq, RestError>;
        pub async fn delete_rfq(&self, input: delete_rfq::DeleteRfqInput) -> Result<(), RestError>;
        pub async fn get_rfq(&self, input: get_rfq::GetRfqInput) -> Result<entities::Rfq, RestError>;
        pub async fn get_rfqs(&self, input: get_rfqs::GetRfqsInput) -> Result<Vec<entities::Rfq>, RestError>;
        pub async fn get_open_rfqs(&self, input: get_open_rfqs::GetOpenRfqsInput) -> Result<Vec<entities::Rfq>, RestError>;
        pub async fn get_my_rfqs(&self, input: get_my_rfqs::GetMyRfqsInput) -> Result<Vec<entities::Rfq>, RestError>;
    }
}
