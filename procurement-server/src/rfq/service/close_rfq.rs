use {
    super::Service,
    crate::{
        api::RestError,
        models::Profile,
        rfq::entities,
    },
};

#[derive(Debug, Clone)]
pub struct CloseRfqInput {
    pub rfq_id:  entities::RfqId,
    pub profile: Profile,
}

impl Service {
    /// Stops accepting bids. Closing an already closed rfq succeeds.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(rfq_id = %input.rfq_id))]
    pub async fn close_rfq(&self, input: CloseRfqInput) -> Result<entities::Rfq, RestError> {
        let rfq = self.repo.get_rfq(input.rfq_id).await?;
        if !rfq.is_owned_by(input.profile.id) {
            return Err(RestError::Forbidden);
        }
        rfq.status.check_transition(entities::RfqStatus::Closed)?;
        self.repo
            .update_rfq_status(rfq.id, entities::RfqStatus::Closed)
            .await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            config::LifecycleConfig,
            kernel::test_utils,
            rfq::repository::MockDatabase,
        },
    };

    fn service_for(rfq: entities::Rfq, update_result: Option<entities::Rfq>) -> Service {
        let mut db = MockDatabase::default();
        db.expect_get_rfq().returning(move |_| Ok(Some(rfq.clone())));
        db.expect_update_rfq_status()
            .returning(move |_, _, _| Ok(update_result.clone()));
        Service::new_with_mocks(db, LifecycleConfig::default())
    }

    #[tokio::test]
    async fn test_close_open_rfq() {
        let customer = test_utils::customer();
        let rfq = test_utils::rfq(customer.id);
        let closed = entities::Rfq {
            status: entities::RfqStatus::Closed,
            ..rfq.clone()
        };
        let service = service_for(rfq.clone(), Some(closed.clone()));
        let result = service
            .close_rfq(CloseRfqInput {
                rfq_id:  rfq.id,
                profile: customer,
            })
            .await;
        assert_eq!(result, Ok(closed));
    }

    #[tokio::test]
    async fn test_reclose_is_accepted() {
        let customer = test_utils::customer();
        let rfq = entities::Rfq {
            status: entities::RfqStatus::Closed,
            ..test_utils::rfq(customer.id)
        };
        let service = service_for(rfq.clone(), Some(rfq.clone()));
        let result = service
            .close_rfq(CloseRfqInput {
                rfq_id:  rfq.id,
                profile: customer,
            })
            .await;
        assert_eq!(result.map(|rfq| rfq.status), Ok(entities::RfqStatus::Closed));
    }

    #[tokio::test]
    async fn test_close_awarded_rfq_fails() {
        let customer = test_utils::customer();
        let rfq = entities::Rfq {
            status: entities::RfqStatus::Awarded,
            ..test_utils::rfq(customer.id)
        };
        let service = service_for(rfq.clone(), None);
        let result = service
            .close_rfq(CloseRfqInput {
                rfq_id:  rfq.id,
                profile: customer,
            })
            .await;
        assert!(matches!(result, Err(RestError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_close_racing_award_fails() {
        let customer = test_utils::customer();
        let rfq = test_utils::rfq(customer.id);
        let service = service_for(rfq.clone(), None);
        let result = service
            .close_rfq(CloseRfqInput {
                rfq_id:  rfq.id,
                profile: customer,
            })
            .await;
        assert!(matches!(result, Err(RestError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_close_other_customers_rfq_is_forbidden() {
        let rfq = test_utils::rfq(test_utils::customer().id);
        let service = service_for(rfq.clone(), None);
        let result = service
            .close_rfq(CloseRfqInput {
                rfq_id:  rfq.id,
                profile: test_utils::customer(),
            })
            .await;
        assert_eq!(result, Err(RestError::Forbidden));
    }
}
