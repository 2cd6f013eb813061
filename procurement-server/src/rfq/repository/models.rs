#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        kernel::{
            db::{
                from_db_time,
                to_db_time,
                DB,
            },
            entities::SequencePrefix,
        },
        models::ProfileId,
    },
    axum::async_trait,
    sqlx::{
        types::Json,
        FromRow,
        Postgres,
        QueryBuilder,
    },
    std::fmt::Debug,
    time::PrimitiveDateTime,
    tracing::instrument,
};

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "rfq_status", rename_all = "snake_case")]
pub enum RfqStatus {
    Open,
    Closed,
    Awarded,
    Cancelled,
}

impl From<entities::RfqStatus> for RfqStatus {
    fn from(status: entities::RfqStatus) -> Self {
        match status {
            entities::RfqStatus::Open => RfqStatus::Open,
            entities::RfqStatus::Closed => RfqStatus::Closed,
            entities::RfqStatus::Awarded => RfqStatus::Awarded,
            entities::RfqStatus::Cancelled => RfqStatus::Cancelled,
        }
    }
}

impl From<RfqStatus> for entities::RfqStatus {
    fn from(status: RfqStatus) -> Self {
        match status {
            RfqStatus::Open => entities::RfqStatus::Open,
            RfqStatus::Closed => entities::RfqStatus::Closed,
            RfqStatus::Awarded => entities::RfqStatus::Awarded,
            RfqStatus::Cancelled => entities::RfqStatus::Cancelled,
        }
    }
}

#[derive(Clone, FromRow, Debug)]
pub struct Rfq {
    pub id:                entities::RfqId,
    pub rfq_number:        String,
    pub title:             String,
    pub description:       String,
    pub category:          String,
    pub quantity:          i64,
    pub unit:              String,
    pub estimated_budget:  Option<f64>,
    pub delivery_location: String,
    pub delivery_date:     PrimitiveDateTime,
    pub start_date:        PrimitiveDateTime,
    pub end_date:          PrimitiveDateTime,
    pub status:            RfqStatus,
    pub customer_id:       ProfileId,
    pub customer_name:     String,
    pub specifications:    Json<entities::Specifications>,
    pub attachments:       Vec<String>,
    pub created_at:        PrimitiveDateTime,
    pub updated_at:        PrimitiveDateTime,
}

impl From<Rfq> for entities::Rfq {
    fn from(rfq: Rfq) -> Self {
        Self {
            id:                rfq.id,
            rfq_number:        rfq.rfq_number,
            title:             rfq.title,
            description:       rfq.description,
            category:          rfq.category,
            quantity:          rfq.quantity,
            unit:              rfq.unit,
            estimated_budget:  rfq.estimated_budget,
            delivery_location: rfq.delivery_location,
            delivery_date:     from_db_time(rfq.delivery_date),
            start_date:        from_db_time(rfq.start_date),
            end_date:          from_db_time(rfq.end_date),
            status:            rfq.status.into(),
            customer_id:       rfq.customer_id,
            customer_name:     rfq.customer_name,
            specifications:    rfq.specifications.0,
            attachments:       rfq.attachments,
            created_at:        from_db_time(rfq.created_at),
            updated_at:        from_db_time(rfq.updated_at),
        }
    }
}

pub fn push_status_guard(query: &mut QueryBuilder<Postgres>, statuses: &[entities::RfqStatus]) {
    query.push(" AND status IN (");
    let mut separated = query.separated(", ");
    for status in statuses {
        separated.push_bind(RfqStatus::from(*status));
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
    async fn next_rfq_number(&self) -> Result<String, RestError>;
    async fn add_rfq(&self, rfq: &entities::Rfq) -> Result<(), RestError>;
    async fn get_rfq(&self, rfq_id: entities::RfqId) -> Result<Option<entities::Rfq>, RestError>;
    async fn get_rfqs(&self, filter: entities::RfqFilter) -> Result<Vec<entities::Rfq>, RestError>;
    /// Writes the editable fields if the rfq is still in one of `expected` statuses.
    async fn update_rfq(
        &self,
        rfq: &entities::Rfq,
        expected: Vec<entities::RfqStatus>,
    ) -> Result<bool, RestError>;
    async fn update_rfq_status(
        &self,
        rfq_id: entities::RfqId,
        expected: Vec<entities::RfqStatus>,
        new_status: entities::RfqStatus,
    ) -> Result<Option<entities::Rfq>, RestError>;
    async fn get_rfq_references(
        &self,
        rfq_id: entities::RfqId,
    ) -> Result<entities::RfqReferences, RestError>;
    async fn delete_rfq(&self, rfq_id: entities::RfqId) -> Result<bool, RestError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_next_rfq_number",
        fields(
            category = "db_queries",
            result = "success",
            name = "next_rfq_number",
            tracing_enabled
        ),
        skip_all
    )]
    async fn next_rfq_number(&self) -> Result<String, RestError> {
        let (value,): (i64,) = sqlx::query_as("SELECT nextval('rfq_number_seq')")
            .fetch_one(self)
            .await
            .map_err(|e| db_error(e, "Failed to draw rfq number"))?;
        Ok(SequencePrefix::Rfq.format(value))
    }

    #[instrument(
        target = "metrics",
        name = "db_add_rfq",
        fields(
            category = "db_queries",
            result = "success",
            name = "add_rfq",
            tracing_enabled
        ),
        skip_all
    )]
    async fn add_rfq(&self, rfq: &entities::Rfq) -> Result<(), RestError> {
        sqlx::query(
            "INSERT INTO rfq (id, rfq_number, title, description, category, quantity, unit, \
             estimated_budget, delivery_location, delivery_date, start_date, end_date, status, \
             customer_id, customer_name, specifications, attachments, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)",
        )
        .bind(rfq.id)
        .bind(&rfq.rfq_number)
        .bind(&rfq.title)
        .bind(&rfq.description)
        .bind(&rfq.category)
        .bind(rfq.quantity)
        .bind(&rfq.unit)
        .bind(rfq.estimated_budget)
        .bind(&rfq.delivery_location)
        .bind(to_db_time(rfq.delivery_date))
        .bind(to_db_time(rfq.start_date))
        .bind(to_db_time(rfq.end_date))
        .bind(RfqStatus::from(rfq.status))
        .bind(rfq.customer_id)
        .bind(&rfq.customer_name)
        .bind(Json(&rfq.specifications))
        .bind(&rfq.attachments)
        .bind(to_db_time(rfq.created_at))
        .bind(to_db_time(rfq.updated_at))
        .execute(self)
        .await
        .map_err(|e| db_error(e, "Failed to insert rfq"))?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_rfq",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_rfq",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_rfq(&self, rfq_id: entities::RfqId) -> Result<Option<entities::Rfq>, RestError> {
        let rfq: Option<Rfq> = sqlx::query_as("SELECT * FROM rfq WHERE id = $1")
            .bind(rfq_id)
            .fetch_optional(self)
            .await
            .map_err(|e| db_error(e, "Failed to fetch rfq"))?;
        Ok(rfq.map(Into::into))
    }

    #[instrument(
        target = "metrics",
        name = "db_get_rfqs",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_rfqs",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_rfqs(&self, filter: entities::RfqFilter) -> Result<Vec<entities::Rfq>, RestError> {
        let mut query = QueryBuilder::new("SELECT * FROM rfq WHERE TRUE");
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(RfqStatus::from(status));
        }
        if let Some(category) = filter.category {
            query.push(" AND category = ").push_bind(category);
        }
        if let Some(customer_id) = filter.customer_id {
            query.push(" AND customer_id = ").push_bind(customer_id);
        }
        if let Some(open_at) = filter.open_at {
            query.push(" AND end_date >= ").push_bind(to_db_time(open_at));
        }
        query.push(" ORDER BY created_at DESC");
        let rfqs: Vec<Rfq> = query
            .build_query_as()
            .fetch_all(self)
            .await
            .map_err(|e| db_error(e, "Failed to fetch rfqs"))?;
        Ok(rfqs.into_iter().map(Into::into).collect())
    }

    #[instrument(
        target = "metrics",
        name = "db_update_rfq",
        fields(
            category = "db_queries",
            result = "success",
            name = "update_rfq",
            tracing_enabled
        ),
        skip_all
    )]
    async fn update_rfq(
        &self,
        rfq: &entities::Rfq,
        expected: Vec<entities::RfqStatus>,
    ) -> Result<bool, RestError> {
        if expected.is_empty() {
            return Ok(false);
        }
        let mut query = QueryBuilder::new("UPDATE rfq SET title = ");
        query
            .push_bind(&rfq.title)
            .push(", description = ")
            .push_bind(&rfq.description)
            .push(", category = ")
            .push_bind(&rfq.category)
            .push(", quantity = ")
            .push_bind(rfq.quantity)
            .push(", unit = ")
            .push_bind(&rfq.unit)
            .push(", estimated_budget = ")
            .push_bind(rfq.estimated_budget)
            .push(", delivery_location = ")
            .push_bind(&rfq.delivery_location)
            .push(", delivery_date = ")
            .push_bind(to_db_time(rfq.delivery_date))
            .push(", end_date = ")
            .push_bind(to_db_time(rfq.end_date))
            .push(", specifications = ")
            .push_bind(Json(&rfq.specifications))
            .push(", attachments = ")
            .push_bind(&rfq.attachments)
            .push(", updated_at = ")
            .push_bind(to_db_time(rfq.updated_at))
            .push(" WHERE id = ")
            .push_bind(rfq.id);
        push_status_guard(&mut query, &expected);
        let result = query
            .build()
            .execute(self)
            .await
            .map_err(|e| db_error(e, "Failed to update rfq"))?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(
        target = "metrics",
        name = "db_update_rfq_status",
        fields(
            category = "db_queries",
            result = "success",
            name = "update_rfq_status",
            tracing_enabled
        ),
        skip_all
    )]
    async fn update_rfq_status(
        &self,
        rfq_id: entities::RfqId,
        expected: Vec<entities::RfqStatus>,
        new_status: entities::RfqStatus,
    ) -> Result<Option<entities::Rfq>, RestError> {
        if expected.is_empty() {
            return Ok(None);
        }
        let mut query = QueryBuilder::new("UPDATE rfq SET status = ");
        query
            .push_bind(RfqStatus::from(new_status))
            .push(", updated_at = ")
            .push_bind(to_db_time(time::OffsetDateTime::now_utc()))
            .push(" WHERE id = ")
            .push_bind(rfq_id);
        push_status_guard(&mut query, &expected);
        query.push(" RETURNING *");
        let rfq: Option<Rfq> = query
            .build_query_as()
            .fetch_optional(self)
            .await
            .map_err(|e| db_error(e, "Failed to update rfq status"))?;
        Ok(rfq.map(Into::into))
    }

    #[instrument(
        target = "metrics",
        name = "db_get_rfq_references",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_rfq_references",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_rfq_references(
        &self,
        rfq_id: entities::RfqId,
    ) -> Result<entities::RfqReferences, RestError> {
        let (bids, contracts): (i64, i64) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM bid WHERE rfq_id = $1), \
             (SELECT COUNT(*) FROM contract WHERE rfq_id = $1)",
        )
        .bind(rfq_id)
        .fetch_one(self)
        .await
        .map_err(|e| db_error(e, "Failed to count rfq references"))?;
        Ok(entities::RfqReferences { bids, contracts })
    }

    #[instrument(
        target = "metrics",
        name = "db_delete_rfq",
        fields(
            category = "db_queries",
            result = "success",
            name = "delete_rfq",
            tracing_enabled
        ),
        skip_all
    )]
    async fn delete_rfq(&self, rfq_id: entities::RfqId) -> Result<bool, RestError> {
        let result = sqlx::query("DELETE FROM rfq WHERE id = $1")
            .bind(rfq_id)
            .execute(self)
            .await
            .map_err(|e| db_error(e, "Failed to delete rfq"))?;
        Ok(result.rows_affected() > 0)
    }
}
