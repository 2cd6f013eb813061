use {
    super::{
        verification::verify_bid_create,
        Service,
    },
    crate::{
        api::RestError,
        bid::{
            entities,
            repository::DUPLICATE_BID_MESSAGE,
        },
        models::Profile,
        rfq::service::get_rfq::GetRfqInput,
    },
    time::OffsetDateTime,
};

#[derive(Debug, Clone)]
pub struct CreateBidInput {
    pub bid_create: entities::BidCreate,
    pub profile:    Profile,
}

impl Service {
    /// Checks run in a fixed order so each failure is reported on its own.
    #[tracing::instrument(
        skip_all,
        err(level = tracing::Level::TRACE),
        fields(rfq_id = %input.bid_create.rfq_id, bid_id)
    )]
    pub async fn create_bid(&self, input: CreateBidInput) -> Result<entities::Bid, RestError> {
        if !input.profile.is_vendor() {
            return Err(RestError::Forbidden);
        }
        verify_bid_create(&input.bid_create)?;

        let rfq = self
            .rfq_service
            .get_rfq(GetRfqInput {
                rfq_id: input.bid_create.rfq_id,
            })
            .await?;
        rfq.check_accepts_bids(OffsetDateTime::now_utc())?;
        if self
            .repo
            .get_live_bid(rfq.id, input.profile.id)
            .await?
            .is_some()
        {
            return Err(RestError::InvalidState(DUPLICATE_BID_MESSAGE.to_string()));
        }

        let bid = self
            .repo
            .add_bid(
                input.bid_create,
                &input.profile,
                self.config.default_bid_validity_days,
            )
            .await?;
        tracing::Span::current().record("bid_id", bid.id.to_string());
        tracing::info!(bid_number = bid.bid_number, "Bid submitted");
        Ok(bid)
    }
}
