#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        bid::{
            entities::{
                BidId,
                BidStatus as BidEntityStatus,
            },
            repository::{
                push_status_guard as push_bid_status_guard,
                BidStatus,
            },
        },
        kernel::{
            db::{
                from_db_time,
                is_unique_violation,
                to_db_time,
                DB,
            },
            entities::SequencePrefix,
        },
        models::ProfileId,
        rfq::{
            entities::{
                RfqId,
                RfqStatus as RfqEntityStatus,
            },
            repository::{
                push_status_guard as push_rfq_status_guard,
                RfqStatus,
            },
        },
    },
    axum::async_trait,
    sqlx::{
        FromRow,
        Postgres,
        QueryBuilder,
    },
    std::fmt::Debug,
    time::{
        OffsetDateTime,
        PrimitiveDateTime,
    },
    tracing::instrument,
};

pub const DUPLICATE_CONTRACT_MESSAGE: &str = "Contract already exists for this bid";

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "contract_status", rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

impl From<entities::ContractStatus> for ContractStatus {
    fn from(status: entities::ContractStatus) -> Self {
        match status {
            entities::ContractStatus::Draft => ContractStatus::Draft,
            entities::ContractStatus::Active => ContractStatus::Active,
            entities::ContractStatus::Completed => ContractStatus::Completed,
            entities::ContractStatus::Cancelled => ContractStatus::Cancelled,
        }
    }
}

impl From<ContractStatus> for entities::ContractStatus {
    fn from(status: ContractStatus) -> Self {
        match status {
            ContractStatus::Draft => entities::ContractStatus::Draft,
            ContractStatus::Active => entities::ContractStatus::Active,
            ContractStatus::Completed => entities::ContractStatus::Completed,
            ContractStatus::Cancelled => entities::ContractStatus::Cancelled,
        }
    }
}

#[derive(Clone, FromRow, Debug)]
pub struct Contract {
    pub id:              entities::ContractId,
    pub contract_number: String,
    pub rfq_id:          RfqId,
    pub bid_id:          BidId,
    pub customer_id:     ProfileId,
    pub vendor_id:       ProfileId,
    pub contract_value:  f64,
    pub start_date:      PrimitiveDateTime,
    pub end_date:        PrimitiveDateTime,
    pub terms:           Option<String>,
    pub payment_terms:   Option<String>,
    pub delivery_terms:  Option<String>,
    pub status:          ContractStatus,
    pub created_at:      PrimitiveDateTime,
    pub updated_at:      PrimitiveDateTime,
}

impl From<Contract> for entities::Contract {
    fn from(contract: Contract) -> Self {
        Self {
            id:              contract.id,
            contract_number: contract.contract_number,
            rfq_id:          contract.rfq_id,
            bid_id:          contract.bid_id,
            customer_id:     contract.customer_id,
            vendor_id:       contract.vendor_id,
            contract_value:  contract.contract_value,
            start_date:      from_db_time(contract.start_date),
            end_date:        from_db_time(contract.end_date),
            terms:           contract.terms,
            payment_terms:   contract.payment_terms,
            delivery_terms:  contract.delivery_terms,
            status:          contract.status.into(),
            created_at:      from_db_time(contract.created_at),
            updated_at:      from_db_time(contract.updated_at),
        }
    }
}

fn push_status_guard(query: &mut QueryBuilder<Postgres>, statuses: &[entities::ContractStatus]) {
    query.push(" AND status IN (");
    let mut separated = query.separated(", ");
    for status in statuses {
        separated.push_bind(ContractStatus::from(*status));
    }
    separated.push_unseparated(")");
}

fn db_error(e: sqlx::Error, message: &str) -> RestError {
    tracing::Span::current().record("result", "error");
    tracing::error!(error = e.to_string(), "DB: {}", message);
    RestError::TemporarilyUnavailable
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn next_contract_number(&self) -> Result<String, RestError>;
    async fn contract_exists(&self, rfq_id: RfqId, bid_id: BidId) -> Result<bool, RestError>;
    /// Stores the contract, awards its rfq, accepts its bid and rejects the competing bids.
    /// Nothing is written unless every step succeeds.
    async fn award(&self, contract: &entities::Contract) -> Result<entities::Award, RestError>;
    async fn get_contract(
        &self,
        contract_id: entities::ContractId,
    ) -> Result<Option<entities::Contract>, RestError>;
    async fn get_contracts(
        &self,
        filter: entities::ContractFilter,
    ) -> Result<Vec<entities::Contract>, RestError>;
    async fn update_contract(
        &self,
        contract: &entities::Contract,
        expected: Vec<entities::ContractStatus>,
    ) -> Result<bool, RestError>;
    async fn update_contract_status(
        &self,
        contract_id: entities::ContractId,
        expected: Vec<entities::ContractStatus>,
        new_status: entities::ContractStatus,
    ) -> Result<Option<entities::Contract>, RestError>;
    async fn delete_contract(&self, contract_id: entities::ContractId) -> Result<bool, RestError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_next_contract_number",
        fields(
            category = "db_queries",
            result = "success",
            name = "next_contract_number",
            tracing_enabled
        ),
        skip_all
    )]
    async fn next_contract_number(&self) -> Result<String, RestError> {
        let (value,): (i64,) = sqlx::query_as("SELECT nextval('contract_number_seq')")
            .fetch_one(self)
            .await
            .map_err(|e| db_error(e, "Failed to draw contract number"))?;
        Ok(SequencePrefix::Contract.format(value))
    }

    #[instrument(
        target = "metrics",
        name = "db_contract_exists",
        fields(
            category = "db_queries",
            result = "success",
            name = "contract_exists",
            tracing_enabled
        ),
        skip_all
    )]
    async fn contract_exists(&self, rfq_id: RfqId, bid_id: BidId) -> Result<bool, RestError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM contract WHERE rfq_id = $1 AND bid_id = $2)",
        )
        .bind(rfq_id)
        .bind(bid_id)
        .fetch_one(self)
        .await
        .map_err(|e| db_error(e, "Failed to check contract existence"))?;
        Ok(exists)
    }

    #[instrument(
        target = "metrics",
        name = "db_award",
        fields(
            category = "db_queries",
            result = "success",
            name = "award",
            tracing_enabled
        ),
        skip_all
    )]
    async fn award(&self, contract: &entities::Contract) -> Result<entities::Award, RestError> {
        let now = to_db_time(OffsetDateTime::now_utc());
        let mut tx = self
            .begin()
            .await
            .map_err(|e| db_error(e, "Failed to begin award transaction"))?;

        let inserted: Contract = sqlx::query_as(
            "INSERT INTO contract (id, contract_number, rfq_id, bid_id, customer_id, vendor_id, \
             contract_value, start_date, end_date, terms, payment_terms, delivery_terms, status, \
             created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) RETURNING *",
        )
        .bind(contract.id)
        .bind(&contract.contract_number)
        .bind(contract.rfq_id)
        .bind(contract.bid_id)
        .bind(contract.customer_id)
        .bind(contract.vendor_id)
        .bind(contract.contract_value)
        .bind(to_db_time(contract.start_date))
        .bind(to_db_time(contract.end_date))
        .bind(&contract.terms)
        .bind(&contract.payment_terms)
        .bind(&contract.delivery_terms)
        .bind(ContractStatus::from(contract.status))
        .bind(to_db_time(contract.created_at))
        .bind(to_db_time(contract.updated_at))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return RestError::InvalidState(DUPLICATE_CONTRACT_MESSAGE.to_string());
            }
            db_error(e, "Failed to insert contract")
        })?;

        let mut query = QueryBuilder::new("UPDATE rfq SET status = ");
        query
            .push_bind(RfqStatus::Awarded)
            .push(", updated_at = ")
            .push_bind(now)
            .push(" WHERE id = ")
            .push_bind(contract.rfq_id);
        push_rfq_status_guard(
            &mut query,
            &RfqEntityStatus::predecessors(RfqEntityStatus::Awarded),
        );
        let rfq_awarded = query
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error(e, "Failed to award rfq"))?
            .rows_affected();
        if rfq_awarded == 0 {
            return Err(RestError::InvalidState(
                "RFQ is no longer open".to_string(),
            ));
        }

        let mut query = QueryBuilder::new("UPDATE bid SET status = ");
        query
            .push_bind(BidStatus::Accepted)
            .push(", updated_at = ")
            .push_bind(now)
            .push(" WHERE id = ")
            .push_bind(contract.bid_id)
            .push(" AND rfq_id = ")
            .push_bind(contract.rfq_id);
        push_bid_status_guard(
            &mut query,
            &BidEntityStatus::predecessors(BidEntityStatus::Accepted),
        );
        let bid_accepted = query
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error(e, "Failed to accept bid"))?
            .rows_affected();
        if bid_accepted == 0 {
            return Err(RestError::InvalidState(
                "Bid can no longer be accepted".to_string(),
            ));
        }

        let mut query = QueryBuilder::new("UPDATE bid SET status = ");
        query
            .push_bind(BidStatus::Rejected)
            .push(", updated_at = ")
            .push_bind(now)
            .push(" WHERE rfq_id = ")
            .push_bind(contract.rfq_id)
            .push(" AND id <> ")
            .push_bind(contract.bid_id);
        push_bid_status_guard(&mut query, &BidEntityStatus::non_terminal());
        let rejected_bids = query
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error(e, "Failed to reject competing bids"))?
            .rows_affected();

        tx.commit()
            .await
            .map_err(|e| db_error(e, "Failed to commit award transaction"))?;

        Ok(entities::Award {
            contract: inserted.into(),
            rejected_bids,
        })
    }

    #[instrument(
        target = "metrics",
        name = "db_get_contract",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_contract",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_contract(
        &self,
        contract_id: entities::ContractId,
    ) -> Result<Option<entities::Contract>, RestError> {
        let contract: Option<Contract> = sqlx::query_as("SELECT * FROM contract WHERE id = $1")
            .bind(contract_id)
            .fetch_optional(self)
            .await
            .map_err(|e| db_error(e, "Failed to fetch contract"))?;
        Ok(contract.map(Into::into))
    }

    #[instrument(
        target = "metrics",
        name = "db_get_contracts",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_contracts",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_contracts(
        &self,
        filter: entities::ContractFilter,
    ) -> Result<Vec<entities::Contract>, RestError> {
        let mut query = QueryBuilder::new("SELECT * FROM contract WHERE TRUE");
        if let Some(customer_id) = filter.customer_id {
            query.push(" AND customer_id = ").push_bind(customer_id);
        }
        if let Some(vendor_id) = filter.vendor_id {
            query.push(" AND vendor_id = ").push_bind(vendor_id);
        }
        query.push(" ORDER BY created_at DESC");
        let contracts: Vec<Contract> = query
            .build_query_as()
            .fetch_all(self)
            .await
            .map_err(|e| db_error(e, "Failed to fetch contracts"))?;
        Ok(contracts.into_iter().map(Into::into).collect())
    }

    #[instrument(
        target = "metrics",
        name = "db_update_contract",
        fields(
            category = "db_queries",
            result = "success",
            name = "update_contract",
            tracing_enabled
        ),
        skip_all
    )]
    async fn update_contract(
        &self,
        contract: &entities::Contract,
        expected: Vec<entities::ContractStatus>,
    ) -> Result<bool, RestError> {
        if expected.is_empty() {
            return Ok(false);
        }
        let mut query = QueryBuilder::new("UPDATE contract SET contract_value = ");
        query
            .push_bind(contract.contract_value)
            .push(", start_date = ")
            .push_bind(to_db_time(contract.start_date))
            .push(", end_date = ")
            .push_bind(to_db_time(contract.end_date))
            .push(", terms = ")
            .push_bind(&contract.terms)
            .push(", payment_terms = ")
            .push_bind(&contract.payment_terms)
            .push(", delivery_terms = ")
            .push_bind(&contract.delivery_terms)
            .push(", updated_at = ")
            .push_bind(to_db_time(contract.updated_at))
            .push(" WHERE id = ")
            .push_bind(contract.id);
        push_status_guard(&mut query, &expected);
        let result = query
            .build()
            .execute(self)
            .await
            .map_err(|e| db_error(e, "Failed to update contract"))?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(
        target = "metrics",
        name = "db_update_contract_status",
        fields(
            category = "db_queries",
            result = "success",
            name = "update_contract_status",
            tracing_enabled
        ),
        skip_all
    )]
    async fn update_contract_status(
        &self,
        contract_id: entities::ContractId,
        expected: Vec<entities::ContractStatus>,
        new_status: entities::ContractStatus,
    ) -> Result<Option<entities::Contract>, RestError> {
        if expected.is_empty() {
            return Ok(None);
        }
        let mut query = QueryBuilder::new("UPDATE contract SET status = ");
        query
            .push_bind(ContractStatus::from(new_status))
            .push(", updated_at = ")
            .push_bind(to_db_time(OffsetDateTime::now_utc()))
            .push(" WHERE id = ")
            .push_bind(contract_id);
        push_status_guard(&mut query, &expected);
        query.push(" RETURNING *");
        let contract: Option<Contract> = query
            .build_query_as()
            .fetch_optional(self)
            .await
            .map_err(|e| db_error(e, "Failed to update contract status"))?;
        Ok(contract.map(Into::into))
    }

    #[instrument(
        target = "metrics",
        name = "db_delete_contract",
        fields(
            category = "db_queries",
            result = "success",
            name = "delete_contract",
            tracing_enabled
        ),
        skip_all
    )]
    async fn delete_contract(&self, contract_id: entities::ContractId) -> Result<bool, RestError> {
        let result = sqlx::query("DELETE FROM contract WHERE id = $1")
            .bind(contract_id)
            .execute(self)
            .await
            .map_err(|e| db_error(e, "Failed to delete contract"))?;
        Ok(result.rows_affected() > 0)
    }
}
