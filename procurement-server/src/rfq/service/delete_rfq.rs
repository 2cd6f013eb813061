use {
    super::Service,
    crate::{
        api::RestError,
        models::Profile,
        rfq::entities,
    },
};

#[derive(Debug, Clone)]
pub struct DeleteRfqInput {
    pub rfq_id:  entities::RfqId,
    pub profile: Profile,
}

impl Service {
    /// Bids on the rfq are removed with it, contracts keep their copy of the rfq id.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(rfq_id = %input.rfq_id))]
    pub async fn delete_rfq(&self, input: DeleteRfqInput) -> Result<(), RestError> {
        let rfq = self.repo.get_rfq(input.rfq_id).await?;
        if !rfq.is_owned_by(input.profile.id) {
            return Err(RestError::Forbidden);
        }

        let references = self.repo.get_rfq_references(rfq.id).await?;
        if !references.is_empty() {
            if self.config.protect_referenced_rfqs {
                return Err(RestError::InvalidState(
                    "Cannot delete an RFQ that has bids or a contract".to_string(),
                ));
            }
            tracing::warn!(
                rfq_number = rfq.rfq_number,
                bids = references.bids,
                contracts = references.contracts,
                "Deleting RFQ which is still referenced"
            );
        }
        self.repo.delete_rfq(rfq.id).await
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

    fn db_with_references(rfq: &entities::Rfq, references: entities::RfqReferences) -> MockDatabase {
        let mut db = MockDatabase::default();
        let returned = rfq.clone();
        db.expect_get_rfq()
            .returning(move |_| Ok(Some(returned.clone())));
        db.expect_get_rfq_references()
            .returning(move |_| Ok(references));
        db
    }

    #[tokio::test]
    async fn test_delete_referenced_rfq_by_default() {
        let customer = test_utils::customer();
        let rfq = test_utils::rfq(customer.id);
        let mut db = db_with_references(
            &rfq,
            entities::RfqReferences {
                bids:      2,
                contracts: 0,
            },
        );
        let rfq_id = rfq.id;
        db.expect_delete_rfq()
            .withf(move |id| *id == rfq_id)
            .times(1)
            .returning(|_| Ok(true));
        let service = Service::new_with_mocks(db, LifecycleConfig::default());

        let result = service
            .delete_rfq(DeleteRfqInput {
                rfq_id:  rfq.id,
                profile: customer,
            })
            .await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_protected_rfq_with_bids_is_kept() {
        let customer = test_utils::customer();
        let rfq = test_utils::rfq(customer.id);
        let mut db = db_with_references(
            &rfq,
            entities::RfqReferences {
                bids:      1,
                contracts: 1,
            },
        );
        db.expect_delete_rfq().never();
        let service = Service::new_with_mocks(
            db,
            LifecycleConfig {
                protect_referenced_rfqs: true,
                ..Default::default()
            },
        );

        let result = service
            .delete_rfq(DeleteRfqInput {
                rfq_id:  rfq.id,
                profile: customer,
            })
            .await;
        assert!(matches!(result, Err(RestError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_rfq() {
        let mut db = MockDatabase::default();
        db.expect_get_rfq().returning(|_| Ok(None));
        let service = Service::new_with_mocks(db, LifecycleConfig::default());

        let result = service
            .delete_rfq(DeleteRfqInput {
                rfq_id:  uuid::Uuid::new_v4(),
                profile: test_utils::customer(),
            })
            .await;
        assert_eq!(result, Err(RestError::RfqNotFound));
    }
}
