use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities,
        models,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

impl Repository {
    pub async fn add_bid(
        &self,
        bid_create: entities::BidCreate,
        vendor: &models::Profile,
        default_validity_period: i64,
    ) -> Result<entities::Bid, RestError> {
        let now = OffsetDateTime::now_utc();
        let bid = entities::Bid {
            id:                      Uuid::new_v4(),
            bid_number:              self.db.next_bid_number().await?,
            rfq_id:                  bid_create.rfq_id,
            vendor_id:               vendor.id,
            vendor_name:             vendor.name.clone(),
            vendor_company:          vendor.company.clone(),
            quoted_price:            bid_create.quoted_price,
            delivery_time:           bid_create.delivery_time,
            delivery_time_unit:      bid_create.delivery_time_unit,
            validity_period:         bid_create
                .validity_period
                .unwrap_or(default_validity_period),
            comments:                bid_create.comments,
            specification_overrides: bid_create.specification_overrides,
            status:                  entities::BidStatus::Submitted,
            submitted_at:            now,
            updated_at:              now,
        };
        if !self.db.add_bid(&bid).await? {
            return Err(RestError::InvalidState(
                "RFQ is not open for bidding".to_string(),
            ));
        }
        Ok(bid)
    }
}
