use {
    super::Service,
    crate::{
        api::RestError,
        rfq::entities,
    },
};

pub struct GetRfqsInput {
    pub status:   Option<entities::RfqStatus>,
    pub category: Option<String>,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE))]
    pub async fn get_rfqs(&self, input: GetRfqsInput) -> Result<Vec<entities::Rfq>, RestError> {
        self.repo
            .get_rfqs(entities::RfqFilter {
                status: input.status,
                category: input.category.filter(|category| !category.trim().is_empty()),
                ..Default::default()
            })
            .await
    }
}
