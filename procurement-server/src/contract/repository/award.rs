use {
    super::Repository,
    crate::{
        api::RestError,
        contract::entities,
        models::ProfileId,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

impl Repository {
    /// Drafts a contract for the winning bid and settles the rfq in one transaction.
    pub async fn award(
        &self,
        contract_create: entities::ContractCreate,
        customer_id: ProfileId,
        vendor_id: ProfileId,
    ) -> Result<entities::Award, RestError> {
        let now = OffsetDateTime::now_utc();
        let contract = entities::Contract {
            id: Uuid::new_v4(),
            contract_number: self.db.next_contract_number().await?,
            rfq_id: contract_create.rfq_id,
            bid_id: contract_create.bid_id,
            customer_id,
            vendor_id,
            contract_value: contract_create.contract_value,
            start_date: contract_create.start_date,
            end_date: contract_create.end_date,
            terms: contract_create.terms,
            payment_terms: contract_create.payment_terms,
            delivery_terms: contract_create.delivery_terms,
            status: entities::ContractStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        self.db.award(&contract).await
    }
}
