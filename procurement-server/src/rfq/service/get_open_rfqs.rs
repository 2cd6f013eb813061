use {
    super::Service,
    crate::{
        api::RestError,
        rfq::entities,
    },
    time::OffsetDateTime,
};

pub struct GetOpenRfqsInput {}

impl Service {
    /// Rfqs which are open and whose bidding window has not ended yet.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE))]
    pub async fn get_open_rfqs(
        &self,
        _input: GetOpenRfqsInput,
    ) -> Result<Vec<entities::Rfq>, RestError> {
        self.repo
            .get_rfqs(entities::RfqFilter {
                status: Some(entities::RfqStatus::Open),
                open_at: Some(OffsetDateTime::now_utc()),
                ..Default::default()
            })
            .await
    }
}
