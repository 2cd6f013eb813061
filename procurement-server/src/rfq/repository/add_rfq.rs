use {
    super::Repository,
    crate::{
        api::RestError,
        models,
        rfq::entities,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

impl Repository {
    pub async fn add_rfq(
        &self,
        rfq_create: entities::RfqCreate,
        customer: &models::Profile,
    ) -> Result<entities::Rfq, RestError> {
        let now = OffsetDateTime::now_utc();
        let rfq = entities::Rfq {
            id:                Uuid::new_v4(),
            rfq_number:        self.db.next_rfq_number().await?,
            title:             rfq_create.title,
            description:       rfq_create.description,
            category:          rfq_create.category,
            quantity:          rfq_create.quantity,
            unit:              rfq_create.unit,
            estimated_budget:  rfq_create.estimated_budget,
            delivery_location: rfq_create.delivery_location,
            delivery_date:     rfq_create.delivery_date,
            start_date:        rfq_create.start_date.unwrap_or(now),
            end_date:          rfq_create.end_date,
            status:            entities::RfqStatus::Open,
            customer_id:       customer.id,
            customer_name:     customer.name.clone(),
            specifications:    rfq_create.specifications,
            attachments:       rfq_create.attachments,
            created_at:        now,
            updated_at:        now,
        };
        self.db.add_rfq(&rfq).await?;
        Ok(rfq)
    }
}
