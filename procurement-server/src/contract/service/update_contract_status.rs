use {
    super::Service,
    crate::{
        api::RestError,
        contract::entities,
        models::Profile,
    },
};

#[derive(Debug, Clone)]
pub struct UpdateContractStatusInput {
    pub contract_id: entities::ContractId,
    pub new_status:  entities::ContractStatus,
    pub profile:     Profile,
}

impl Service {
    #[tracing::instrument(
        skip_all,
        err(level = tracing::Level::TRACE),
        fields(contract_id = %input.contract_id, new_status = input.new_status.as_ref())
    )]
    pub async fn update_contract_status(
        &self,
        input: UpdateContractStatusInput,
    ) -> Result<entities::Contract, RestError> {
        let contract = self.repo.get_contract(input.contract_id).await?;
        if contract.customer_id != input.profile.id {
            return Err(RestError::Forbidden);
        }
        contract.status.check_transition(input.new_status)?;
        let contract = self
            .repo
            .update_contract_status(contract.id, input.new_status)
            .await?;
        tracing::info!(
            contract_number = contract.contract_number,
            status = contract.status.as_ref(),
            "Contract status changed"
        );
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            bid::service::MockService as BidService,
            contract::repository::MockDatabase,
            kernel::test_utils,
            rfq::service::MockService as RfqService,
        },
    };

    fn contract_with_status(
        customer: &Profile,
        status: entities::ContractStatus,
    ) -> entities::Contract {
        let rfq = test_utils::rfq(customer.id);
        let bid = test_utils::bid(rfq.id, test_utils::vendor().id);
        entities::Contract {
            status,
            ..test_utils::contract(&rfq, &bid)
        }
    }

    #[tokio::test]
    async fn test_customer_activates_draft_contract() {
        let customer = test_utils::customer();
        let contract = contract_with_status(&customer, entities::ContractStatus::Draft);
        let mut db = MockDatabase::default();
        let returned = contract.clone();
        db.expect_get_contract()
            .returning(move |_| Ok(Some(returned.clone())));
        let active = entities::Contract {
            status: entities::ContractStatus::Active,
            ..contract.clone()
        };
        let updated = active.clone();
        db.expect_update_contract_status()
            .withf(|_, expected, new_status| {
                *new_status == entities::ContractStatus::Active
                    && expected == &vec![entities::ContractStatus::Draft]
            })
            .times(1)
            .returning(move |_, _, _| Ok(Some(updated.clone())));
        let service =
            Service::new_with_mocks(db, RfqService::default(), BidService::default());

        let result = service
            .update_contract_status(UpdateContractStatusInput {
                contract_id: contract.id,
                new_status:  entities::ContractStatus::Active,
                profile:     customer,
            })
            .await;
        assert_eq!(result, Ok(active));
    }

    #[tokio::test]
    async fn test_completed_contract_is_terminal() {
        let customer = test_utils::customer();
        let contract = contract_with_status(&customer, entities::ContractStatus::Completed);
        let mut db = MockDatabase::default();
        let returned = contract.clone();
        db.expect_get_contract()
            .returning(move |_| Ok(Some(returned.clone())));
        db.expect_update_contract_status().never();
        let service =
            Service::new_with_mocks(db, RfqService::default(), BidService::default());

        let result = service
            .update_contract_status(UpdateContractStatusInput {
                contract_id: contract.id,
                new_status:  entities::ContractStatus::Cancelled,
                profile:     customer,
            })
            .await;
        assert_eq!(
            result,
            Err(RestError::InvalidState(
                "Cannot change contract status from completed to cancelled".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_vendor_cannot_change_contract_status() {
        let customer = test_utils::customer();
        let contract = contract_with_status(&customer, entities::ContractStatus::Draft);
        let vendor = Profile {
            id: contract.vendor_id,
            ..test_utils::vendor()
        };
        let mut db = MockDatabase::default();
        let returned = contract.clone();
        db.expect_get_contract()
            .returning(move |_| Ok(Some(returned.clone())));
        let service =
            Service::new_with_mocks(db, RfqService::default(), BidService::default());

        let result = service
            .update_contract_status(UpdateContractStatusInput {
                contract_id: contract.id,
                new_status:  entities::ContractStatus::Active,
                profile:     vendor,
            })
            .await;
        assert_eq!(result, Err(RestError::Forbidden));
    }
}
