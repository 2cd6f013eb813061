use {
    super::Service,
    crate::{
        api::RestError,
        contract::entities,
        models::Profile,
    },
};

#[derive(Debug, Clone)]
pub struct GetContractInput {
    pub contract_id: entities::ContractId,
    pub profile:     Profile,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(contract_id = %input.contract_id))]
    pub async fn get_contract(
        &self,
        input: GetContractInput,
    ) -> Result<entities::Contract, RestError> {
        let contract = self.repo.get_contract(input.contract_id).await?;
        if contract.is_party(input.profile.id) {
            Ok(contract)
        } else {
            Err(RestError::Forbidden)
        }
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

    fn service_with(contract: &entities::Contract) -> Service {
        let mut db = MockDatabase::default();
        let returned = contract.clone();
        db.expect_get_contract()
            .returning(move |_| Ok(Some(returned.clone())));
        Service::new_with_mocks(db, RfqService::default(), BidService::default())
    }

    #[tokio::test]
    async fn test_both_parties_see_contract() {
        let customer = test_utils::customer();
        let rfq = test_utils::rfq(customer.id);
        let vendor = test_utils::vendor();
        let bid = test_utils::bid(rfq.id, vendor.id);
        let contract = test_utils::contract(&rfq, &bid);
        let service = service_with(&contract);

        for profile in [customer, vendor] {
            let result = service
                .get_contract(GetContractInput {
                    contract_id: contract.id,
                    profile,
                })
                .await;
            assert_eq!(result, Ok(contract.clone()));
        }
    }

    #[tokio::test]
    async fn test_outsider_is_forbidden() {
        let rfq = test_utils::rfq(test_utils::customer().id);
        let bid = test_utils::bid(rfq.id, test_utils::vendor().id);
        let contract = test_utils::contract(&rfq, &bid);
        let service = service_with(&contract);

        let result = service
            .get_contract(GetContractInput {
                contract_id: contract.id,
                profile:     test_utils::vendor(),
            })
            .await;
        assert_eq!(result, Err(RestError::Forbidden));
    }
}
