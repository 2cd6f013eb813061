use {
    super::Service,
    crate::{
        api::RestError,
        models::Profile,
        rfq::entities,
    },
};

#[derive(Debug, Clone)]
pub struct CancelRfqInput {
    pub rfq_id:  entities::RfqId,
    pub profile: Profile,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(rfq_id = %input.rfq_id))]
    pub async fn cancel_rfq(&self, input: CancelRfqInput) -> Result<entities::Rfq, RestError> {
        let rfq = self.repo.get_rfq(input.rfq_id).await?;
        if !rfq.is_owned_by(input.profile.id) {
            return Err(RestError::Forbidden);
        }
        rfq.status.check_transition(entities::RfqStatus::Cancelled)?;
        let rfq = self
            .repo
            .update_rfq_status(rfq.id, entities::RfqStatus::Cancelled)
            .await?;
        tracing::info!(rfq_number = rfq.rfq_number, "RFQ cancelled");
        Ok(rfq)
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

    #[tokio::test]
    async fn test_cancel_closed_rfq() {
        let customer = test_utils::customer();
        let rfq = entities::Rfq {
            status: entities::RfqStatus::Closed,
            ..test_utils::rfq(customer.id)
        };
        let cancelled = entities::Rfq {
            status: entities::RfqStatus::Cancelled,
            ..rfq.clone()
        };
        let mut db = MockDatabase::default();
        let returned = rfq.clone();
        db.expect_get_rfq()
            .returning(move |_| Ok(Some(returned.clone())));
        let updated = cancelled.clone();
        db.expect_update_rfq_status()
            .withf(|_, expected, new_status| {
                *new_status == entities::RfqStatus::Cancelled
                    && expected
                        == &vec![entities::RfqStatus::Open, entities::RfqStatus::Closed]
            })
            .times(1)
            .returning(move |_, _, _| Ok(Some(updated.clone())));
        let service = Service::new_with_mocks(db, LifecycleConfig::default());

        let result = service
            .cancel_rfq(CancelRfqInput {
                rfq_id:  rfq.id,
                profile: customer,
            })
            .await;
        assert_eq!(result, Ok(cancelled));
    }

    #[tokio::test]
    async fn test_cancel_cancelled_rfq_fails() {
        let customer = test_utils::customer();
        let rfq = entities::Rfq {
            status: entities::RfqStatus::Cancelled,
            ..test_utils::rfq(customer.id)
        };
        let mut db = MockDatabase::default();
        let returned = rfq.clone();
        db.expect_get_rfq()
            .returning(move |_| Ok(Some(returned.clone())));
        db.expect_update_rfq_status().never();
        let service = Service::new_with_mocks(db, LifecycleConfig::default());

        let result = service
            .cancel_rfq(CancelRfqInput {
                rfq_id:  rfq.id,
                profile: customer,
            })
            .await;
        assert_eq!(
            result,
            Err(RestError::InvalidState(
                "Cannot change RFQ status from cancelled to cancelled".to_string()
            ))
        );
    }
}
