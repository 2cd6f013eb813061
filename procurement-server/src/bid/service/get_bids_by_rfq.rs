use {
    super::Service,
    crate::{
        api::RestError,
        bid::entities,
        models::Profile,
        rfq::{
            entities::RfqId,
            service::get_rfq::GetRfqInput,
        },
    },
};

pub struct GetBidsByRfqInput {
    pub rfq_id:  RfqId,
    pub profile: Profile,
}

impl Service {
    /// The rfq owner sees every bid, a vendor only their own.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(rfq_id = %input.rfq_id))]
    pub async fn get_bids_by_rfq(
        &self,
        input: GetBidsByRfqInput,
    ) -> Result<Vec<entities::Bid>, RestError> {
        let rfq = self
            .rfq_service
            .get_rfq(GetRfqInput {
                rfq_id: input.rfq_id,
            })
            .await?;
        let vendor_id = if rfq.is_owned_by(input.profile.id) {
            None
        } else if input.profile.is_vendor() {
            Some(input.profile.id)
        } else {
            return Err(RestError::Forbidden);
        };
        self.repo
            .get_bids(entities::BidFilter {
                rfq_id: Some(rfq.id),
                vendor_id,
            })
            .await
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

    #[tokio::test]
    async fn test_vendor_sees_only_own_bids() {
        let rfq = test_utils::rfq(test_utils::customer().id);
        let vendor = test_utils::vendor();
        let mut db = MockDatabase::default();
        let (rfq_id, vendor_id) = (rfq.id, vendor.id);
        db.expect_get_bids()
            .withf(move |filter| {
                filter.rfq_id == Some(rfq_id) && filter.vendor_id == Some(vendor_id)
            })
            .times(1)
            .returning(|_| Ok(vec![]));
        let service = Service::new_with_mocks(db, rfq_service_with(rfq.clone()));

        let result = service
            .get_bids_by_rfq(GetBidsByRfqInput {
                rfq_id:  rfq.id,
                profile: vendor,
            })
            .await;
        assert_eq!(result, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_owner_sees_all_bids() {
        let customer = test_utils::customer();
        let rfq = test_utils::rfq(customer.id);
        let bids = vec![
            test_utils::bid(rfq.id, test_utils::vendor().id),
            test_utils::bid(rfq.id, test_utils::vendor().id),
        ];
        let mut db = MockDatabase::default();
        let returned = bids.clone();
        db.expect_get_bids()
            .withf(|filter| filter.vendor_id.is_none())
            .returning(move |_| Ok(returned.clone()));
        let service = Service::new_with_mocks(db, rfq_service_with(rfq.clone()));

        let result = service
            .get_bids_by_rfq(GetBidsByRfqInput {
                rfq_id:  rfq.id,
                profile: customer,
            })
            .await;
        assert_eq!(result, Ok(bids));
    }

    #[tokio::test]
    async fn test_other_customer_is_forbidden() {
        let rfq = test_utils::rfq(test_utils::customer().id);
        let service = Service::new_with_mocks(MockDatabase::default(), rfq_service_with(rfq.clone()));
        let result = service
            .get_bids_by_rfq(GetBidsByRfqInput {
                rfq_id:  rfq.id,
                profile: test_utils::customer(),
            })
            .await;
        assert_eq!(result, Err(RestError::Forbidden));
    }
}
