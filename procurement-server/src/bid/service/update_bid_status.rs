use {
    super::Service,
    crate::{
        api::RestError,
        bid::entities,
        models::Profile,
        rfq::{
            entities::RfqStatus,
            service::get_rfq::GetRfqInput,
        },
    },
};

#[derive(Debug, Clone)]
pub struct UpdateBidStatusInput {
    pub bid_id:     entities::BidId,
    pub new_status: entities::BidStatus,
    pub profile:    Profile,
}

impl Service {
    /// Review decisions of the rfq owner. Withdrawing is left to the vendor.
    #[tracing::instrument(
        skip_all,
        err(level = tracing::Level::TRACE),
        fields(bid_id = %input.bid_id, new_status = input.new_status.as_ref())
    )]
    pub async fn update_bid_status(
        &self,
        input: UpdateBidStatusInput,
    ) -> Result<entities::Bid, RestError> {
        let bid = self.repo.get_bid(input.bid_id).await?;
        let rfq = self
            .rfq_service
            .get_rfq(GetRfqInput { rfq_id: bid.rfq_id })
            .await?;
        if !rfq.is_owned_by(input.profile.id) {
            return Err(RestError::Forbidden);
        }
        if !entities::BidStatus::SETTABLE_BY_CUSTOMER.contains(&input.new_status) {
            return Err(RestError::Forbidden);
        }
        if rfq.status != RfqStatus::Open {
            return Err(RestError::InvalidState(format!(
                "Cannot review bids of an RFQ that is {}",
                rfq.status.as_ref()
            )));
        }
        bid.status.check_transition(input.new_status)?;
        self.repo.update_bid_status(bid.id, input.new_status).await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            bid::{
                repository::MockDatabase,
                service::tests::rfq_service_with,
            },
            kernel::test_utils,
        },
    };

    async fn update(
        bid: entities::Bid,
        owner: &Profile,
        caller: Profile,
        new_status: entities::BidStatus,
    ) -> Result<entities::Bid, RestError> {
        update_on_rfq(bid, owner, caller, new_status, RfqStatus::Open).await
    }

    async fn update_on_rfq(
        bid: entities::Bid,
        owner: &Profile,
        caller: Profile,
        new_status: entities::BidStatus,
        rfq_status: RfqStatus,
    ) -> Result<entities::Bid, RestError> {
        let rfq = crate::rfq::entities::Rfq {
            id: bid.rfq_id,
            status: rfq_status,
            ..test_utils::rfq(owner.id)
        };
        let mut db = MockDatabase::default();
        let returned = bid.clone();
        db.expect_get_bid()
            .returning(move |_| Ok(Some(returned.clone())));
        let updated = bid.clone();
        db.expect_update_bid_status()
            .returning(move |_, _, status| {
                Ok(Some(entities::Bid {
                    status,
                    ..updated.clone()
                }))
            });
        let service = Service::new_with_mocks(db, rfq_service_with(rfq));
        service
            .update_bid_status(UpdateBidStatusInput {
                bid_id: bid.id,
                new_status,
                profile: caller,
            })
            .await
    }

    #[tokio::test]
    async fn test_owner_moves_bid_under_review() {
        let customer = test_utils::customer();
        let bid = test_utils::bid(uuid::Uuid::new_v4(), test_utils::vendor().id);
        let result = update(
            bid,
            &customer,
            customer.clone(),
            entities::BidStatus::UnderReview,
        )
        .await;
        assert_eq!(
            result.map(|bid| bid.status),
            Ok(entities::BidStatus::UnderReview)
        );
    }

    #[tokio::test]
    async fn test_other_customer_is_forbidden() {
        let customer = test_utils::customer();
        let bid = test_utils::bid(uuid::Uuid::new_v4(), test_utils::vendor().id);
        let result = update(
            bid,
            &customer,
            test_utils::customer(),
            entities::BidStatus::Rejected,
        )
        .await;
        assert_eq!(result, Err(RestError::Forbidden));
    }

    #[tokio::test]
    async fn test_customer_cannot_withdraw() {
        let customer = test_utils::customer();
        let bid = test_utils::bid(uuid::Uuid::new_v4(), test_utils::vendor().id);
        let result = update(
            bid,
            &customer,
            customer.clone(),
            entities::BidStatus::Withdrawn,
        )
        .await;
        assert_eq!(result, Err(RestError::Forbidden));
    }

    #[tokio::test]
    async fn test_rejected_bid_is_final() {
        let customer = test_utils::customer();
        let bid = entities::Bid {
            status: entities::BidStatus::Rejected,
            ..test_utils::bid(uuid::Uuid::new_v4(), test_utils::vendor().id)
        };
        let result = update(
            bid,
            &customer,
            customer.clone(),
            entities::BidStatus::UnderReview,
        )
        .await;
        assert_eq!(
            result,
            Err(RestError::InvalidState(
                "Cannot change bid status from rejected to under_review".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_owner_cannot_accept_bid_without_award() {
        let customer = test_utils::customer();
        let bid = test_utils::bid(uuid::Uuid::new_v4(), test_utils::vendor().id);
        let result = update(
            bid,
            &customer,
            customer.clone(),
            entities::BidStatus::Accepted,
        )
        .await;
        assert_eq!(result, Err(RestError::Forbidden));
    }

    #[tokio::test]
    async fn test_bids_of_closed_rfq_cannot_be_reviewed() {
        let customer = test_utils::customer();
        let bid = test_utils::bid(uuid::Uuid::new_v4(), test_utils::vendor().id);
        for rfq_status in [
            RfqStatus::Closed,
            RfqStatus::Awarded,
            RfqStatus::Cancelled,
        ] {
            let result = update_on_rfq(
                bid.clone(),
                &customer,
                customer.clone(),
                entities::BidStatus::Rejected,
                rfq_status,
            )
            .await;
            assert_eq!(
                result,
                Err(RestError::InvalidState(format!(
                    "Cannot review bids of an RFQ that is {}",
                    rfq_status.as_ref()
                )))
            );
        }
    }
}
