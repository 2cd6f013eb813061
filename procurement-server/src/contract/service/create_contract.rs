use {
    super::{
        verification::verify_contract_create,
        Service,
    },
    crate::{
        api::RestError,
        bid::service::get_bid::GetBidByIdInput,
        contract::{
            entities,
            repository::DUPLICATE_CONTRACT_MESSAGE,
        },
        models::Profile,
        rfq::{
            entities::RfqStatus,
            service::get_rfq::GetRfqInput,
        },
    },
};

#[derive(Debug, Clone)]
pub struct CreateContractInput {
    pub contract_create: entities::ContractCreate,
    pub profile:         Profile,
}

impl Service {
    /// Awards the rfq to the bid. Preconditions are checked in order and the
    /// first failing one is reported.
    #[tracing::instrument(
        skip_all,
        err(level = tracing::Level::TRACE),
        fields(
            rfq_id = %input.contract_create.rfq_id,
            bid_id = %input.contract_create.bid_id,
            contract_id
        )
    )]
    pub async fn create_contract(
        &self,
        input: CreateContractInput,
    ) -> Result<entities::Award, RestError> {
        if !input.profile.is_customer() {
            return Err(RestError::Forbidden);
        }
        verify_contract_create(&input.contract_create)?;

        let rfq = self
            .rfq_service
            .get_rfq(GetRfqInput {
                rfq_id: input.contract_create.rfq_id,
            })
            .await?;
        if !rfq.is_owned_by(input.profile.id) {
            return Err(RestError::Forbidden);
        }
        let bid = self
            .bid_service
            .get_bid_by_id(GetBidByIdInput {
                bid_id: input.contract_create.bid_id,
            })
            .await?;
        if bid.rfq_id != rfq.id {
            return Err(RestError::InvalidState(
                "Bid does not belong to this RFQ".to_string(),
            ));
        }
        if self.repo.contract_exists(rfq.id, bid.id).await? {
            return Err(RestError::InvalidState(
                DUPLICATE_CONTRACT_MESSAGE.to_string(),
            ));
        }
        if rfq.status != RfqStatus::Open {
            return Err(RestError::InvalidState(format!(
                "Cannot award an RFQ that is {}",
                rfq.status.as_ref()
            )));
        }
        if bid.status.is_terminal() {
            return Err(RestError::InvalidState(format!(
                "Cannot accept a bid that is {}",
                bid.status.as_ref()
            )));
        }

        let award = self
            .repo
            .award(input.contract_create, rfq.customer_id, bid.vendor_id)
            .await?;
        tracing::Span::current().record("contract_id", award.contract.id.to_string());
        tracing::info!(
            contract_number = award.contract.contract_number,
            rejected_bids = award.rejected_bids,
            "RFQ awarded"
        );
        Ok(award)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            bid::{
                entities::{
                    Bid,
                    BidStatus,
                },
                service::MockService as BidService,
            },
            contract::repository::MockDatabase,
            kernel::test_utils,
            rfq::{
                entities::Rfq,
                service::MockService as RfqService,
            },
        },
        time::{
            Duration,
            OffsetDateTime,
        },
    };

    fn contract_create(rfq: &Rfq, bid: &Bid) -> entities::ContractCreate {
        let now = OffsetDateTime::now_utc();
        entities::ContractCreate {
            rfq_id:         rfq.id,
            bid_id:         bid.id,
            contract_value: bid.quoted_price,
            start_date:     now + Duration::days(1),
            end_date:       now + Duration::days(90),
            terms:          None,
            payment_terms:  Some("Net 30".to_string()),
            delivery_terms: None,
        }
    }

    fn rfq_service(rfq: &Rfq) -> RfqService {
        let mut rfq_service = RfqService::default();
        let rfq = rfq.clone();
        rfq_service
            .expect_get_rfq()
            .returning(move |input: GetRfqInput| {
                if input.rfq_id == rfq.id {
                    Ok(rfq.clone())
                } else {
                    Err(RestError::RfqNotFound)
                }
            });
        rfq_service
    }

    fn bid_service(bid: &Bid) -> BidService {
        let mut bid_service = BidService::default();
        let bid = bid.clone();
        bid_service
            .expect_get_bid_by_id()
            .returning(move |input: GetBidByIdInput| {
                if input.bid_id == bid.id {
                    Ok(bid.clone())
                } else {
                    Err(RestError::BidNotFound)
                }
            });
        bid_service
    }

    #[tokio::test]
    async fn test_customer_awards_rfq() {
        let customer = test_utils::customer();
        let rfq = test_utils::rfq(customer.id);
        let bid = test_utils::bid(rfq.id, test_utils::vendor().id);
        let contract = test_utils::contract(&rfq, &bid);

        let mut db = MockDatabase::default();
        db.expect_contract_exists().returning(|_, _| Ok(false));
        db.expect_next_contract_number()
            .returning(|| Ok("CNT-000001".to_string()));
        let (customer_id, vendor_id) = (customer.id, bid.vendor_id);
        let awarded = contract.clone();
        db.expect_award()
            .withf(move |contract| {
                contract.customer_id == customer_id
                    && contract.vendor_id == vendor_id
                    && contract.status == entities::ContractStatus::Draft
                    && contract.contract_number == "CNT-000001"
            })
            .times(1)
            .returning(move |_| {
                Ok(entities::Award {
                    contract:      awarded.clone(),
                    rejected_bids: 2,
                })
            });
        let service = Service::new_with_mocks(db, rfq_service(&rfq), bid_service(&bid));

        let award = service
            .create_contract(CreateContractInput {
                contract_create: contract_create(&rfq, &bid),
                profile:         customer,
            })
            .await
            .expect("Award should succeed");
        assert_eq!(award.contract, contract);
        assert_eq!(award.rejected_bids, 2);
    }

    #[tokio::test]
    async fn test_vendor_cannot_create_contract() {
        let rfq = test_utils::rfq(test_utils::customer().id);
        let bid = test_utils::bid(rfq.id, test_utils::vendor().id);
        let service = Service::new_with_mocks(
            MockDatabase::default(),
            RfqService::default(),
            BidService::default(),
        );

        let result = service
            .create_contract(CreateContractInput {
                contract_create: contract_create(&rfq, &bid),
                profile:         test_utils::vendor(),
            })
            .await;
        assert_eq!(result, Err(RestError::Forbidden));
    }

    #[tokio::test]
    async fn test_customer_cannot_award_others_rfq() {
        let rfq = test_utils::rfq(test_utils::customer().id);
        let bid = test_utils::bid(rfq.id, test_utils::vendor().id);
        let service = Service::new_with_mocks(
            MockDatabase::default(),
            rfq_service(&rfq),
            BidService::default(),
        );

        let result = service
            .create_contract(CreateContractInput {
                contract_create: contract_create(&rfq, &bid),
                profile:         test_utils::customer(),
            })
            .await;
        assert_eq!(result, Err(RestError::Forbidden));
    }

    #[tokio::test]
    async fn test_bid_of_another_rfq_is_rejected() {
        let customer = test_utils::customer();
        let rfq = test_utils::rfq(customer.id);
        let bid = test_utils::bid(uuid::Uuid::new_v4(), test_utils::vendor().id);
        let mut db = MockDatabase::default();
        db.expect_award().never();
        let service = Service::new_with_mocks(db, rfq_service(&rfq), bid_service(&bid));

        let result = service
            .create_contract(CreateContractInput {
                contract_create: contract_create(&rfq, &bid),
                profile:         customer,
            })
            .await;
        assert_eq!(
            result,
            Err(RestError::InvalidState(
                "Bid does not belong to this RFQ".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_duplicate_contract_is_rejected() {
        let customer = test_utils::customer();
        let rfq = test_utils::rfq(customer.id);
        let bid = test_utils::bid(rfq.id, test_utils::vendor().id);
        let mut db = MockDatabase::default();
        db.expect_contract_exists().returning(|_, _| Ok(true));
        db.expect_award().never();
        let service = Service::new_with_mocks(db, rfq_service(&rfq), bid_service(&bid));

        let result = service
            .create_contract(CreateContractInput {
                contract_create: contract_create(&rfq, &bid),
                profile:         customer,
            })
            .await;
        assert_eq!(
            result,
            Err(RestError::InvalidState(
                DUPLICATE_CONTRACT_MESSAGE.to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_awarded_rfq_cannot_be_awarded_again() {
        let customer = test_utils::customer();
        let rfq = Rfq {
            status: RfqStatus::Awarded,
            ..test_utils::rfq(customer.id)
        };
        let bid = test_utils::bid(rfq.id, test_utils::vendor().id);
        let mut db = MockDatabase::default();
        db.expect_contract_exists().returning(|_, _| Ok(false));
        db.expect_award().never();
        let service = Service::new_with_mocks(db, rfq_service(&rfq), bid_service(&bid));

        let result = service
            .create_contract(CreateContractInput {
                contract_create: contract_create(&rfq, &bid),
                profile:         customer,
            })
            .await;
        assert!(matches!(result, Err(RestError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_withdrawn_bid_cannot_be_accepted() {
        let customer = test_utils::customer();
        let rfq = test_utils::rfq(customer.id);
        let bid = Bid {
            status: BidStatus::Withdrawn,
            ..test_utils::bid(rfq.id, test_utils::vendor().id)
        };
        let mut db = MockDatabase::default();
        db.expect_contract_exists().returning(|_, _| Ok(false));
        db.expect_award().never();
        let service = Service::new_with_mocks(db, rfq_service(&rfq), bid_service(&bid));

        let result = service
            .create_contract(CreateContractInput {
                contract_create: contract_create(&rfq, &bid),
                profile:         customer,
            })
            .await;
        assert_eq!(
            result,
            Err(RestError::InvalidState(
                "Cannot accept a bid that is withdrawn".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_concurrent_award_is_reported() {
        let customer = test_utils::customer();
        let rfq = test_utils::rfq(customer.id);
        let bid = test_utils::bid(rfq.id, test_utils::vendor().id);
        let mut db = MockDatabase::default();
        db.expect_contract_exists().returning(|_, _| Ok(false));
        db.expect_next_contract_number()
            .returning(|| Ok("CNT-000002".to_string()));
        db.expect_award().returning(|_| {
            Err(RestError::InvalidState(
                "RFQ is no longer open".to_string(),
            ))
        });
        let service = Service::new_with_mocks(db, rfq_service(&rfq), bid_service(&bid));

        let result = service
            .create_contract(CreateContractInput {
                contract_create: contract_create(&rfq, &bid),
                profile:         customer,
            })
            .await;
        assert_eq!(
            result,
            Err(RestError::InvalidState("RFQ is no longer open".to_string()))
        );
    }
}
