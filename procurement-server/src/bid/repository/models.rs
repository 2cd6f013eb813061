#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
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
                Specifications,
            },
            repository::RfqStatus,
        },
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

pub const DUPLICATE_BID_MESSAGE: &str = "You have already submitted a bid for this RFQ";

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "bid_status", rename_all = "snake_case")]
pub enum BidStatus {
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
    Withdrawn,
}

impl From<entities::BidStatus> for BidStatus {
    fn from(status: entities::BidStatus) -> Self {
        match status {
            entities::BidStatus::Submitted => BidStatus::Submitted,
            entities::BidStatus::UnderReview => BidStatus::UnderReview,
            entities::BidStatus::Accepted => BidStatus::Accepted,
            entities::BidStatus::Rejected => BidStatus::Rejected,
            entities::BidStatus::Withdrawn => BidStatus::Withdrawn,
        }
    }
}

impl From<BidStatus> for entities::BidStatus {
    fn from(status: BidStatus) -> Self {
        match status {
            BidStatus::Submitted => entities::BidStatus::Submitted,
            BidStatus::UnderReview => entities::BidStatus::UnderReview,
            BidStatus::Accepted => entities::BidStatus::Accepted,
            BidStatus::Rejected => entities::BidStatus::Rejected,
            BidStatus::Withdrawn => entities::BidStatus::Withdrawn,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "delivery_time_unit", rename_all = "snake_case")]
pub enum DeliveryTimeUnit {
    Days,
    Weeks,
    Months,
}

impl From<entities::DeliveryTimeUnit> for DeliveryTimeUnit {
    fn from(unit: entities::DeliveryTimeUnit) -> Self {
        match unit {
            entities::DeliveryTimeUnit::Days => DeliveryTimeUnit::Days,
            entities::DeliveryTimeUnit::Weeks => DeliveryTimeUnit::Weeks,
            entities::DeliveryTimeUnit::Months => DeliveryTimeUnit::Months,
        }
    }
}

impl From<DeliveryTimeUnit> for entities::DeliveryTimeUnit {
    fn from(unit: DeliveryTimeUnit) -> Self {
        match unit {
            DeliveryTimeUnit::Days => entities::DeliveryTimeUnit::Days,
            DeliveryTimeUnit::Weeks => entities::DeliveryTimeUnit::Weeks,
            DeliveryTimeUnit::Months => entities::DeliveryTimeUnit::Months,
        }
    }
}

#[derive(Clone, FromRow, Debug)]
pub struct Bid {
    pub id:                      entities::BidId,
    pub bid_number:              String,
    pub rfq_id:                  RfqId,
    pub vendor_id:               ProfileId,
    pub vendor_name:             String,
    pub vendor_company:          Option<String>,
    pub quoted_price:            f64,
    pub delivery_time:           i64,
    pub delivery_time_unit:      DeliveryTimeUnit,
    pub validity_period:         i64,
    pub comments:                Option<String>,
    pub specification_overrides: Option<Json<Specifications>>,
    pub status:                  BidStatus,
    pub submitted_at:            PrimitiveDateTime,
    pub updated_at:              PrimitiveDateTime,
}

impl From<Bid> for entities::Bid {
    fn from(bid: Bid) -> Self {
        Self {
            id:                      bid.id,
            bid_number:              bid.bid_number,
            rfq_id:                  bid.rfq_id,
            vendor_id:               bid.vendor_id,
            vendor_name:             bid.vendor_name,
            vendor_company:          bid.vendor_company,
            quoted_price:            bid.quoted_price,
            delivery_time:           bid.delivery_time,
            delivery_time_unit:      bid.delivery_time_unit.into(),
            validity_period:         bid.validity_period,
            comments:                bid.comments,
            specification_overrides: bid.specification_overrides.map(|overrides| overrides.0),
            status:                  bid.status.into(),
            submitted_at:            from_db_time(bid.submitted_at),
            updated_at:              from_db_time(bid.updated_at),
        }
    }
}

#[derive(Clone, FromRow, Debug)]
pub struct VendorBid {
    #[sqlx(flatten)]
    pub bid:          Bid,
    pub rfq_number:   String,
    pub rfq_title:    String,
    pub rfq_status:   RfqStatus,
    pub rfq_end_date: PrimitiveDateTime,
}

impl From<VendorBid> for entities::VendorBid {
    fn from(row: VendorBid) -> Self {
        Self {
            rfq: entities::RfqSummary {
                id:         row.bid.rfq_id,
                rfq_number: row.rfq_number,
                title:      row.rfq_title,
                status:     row.rfq_status.into(),
                end_date:   from_db_time(row.rfq_end_date),
            },
            bid: row.bid.into(),
        }
    }
}

pub fn push_status_guard(query: &mut QueryBuilder<Postgres>, statuses: &[entities::BidStatus]) {
    query.push(" AND status IN (");
    let mut separated = query.separated(", ");
    for status in statuses {
        separated.push_bind(BidStatus::from(*status));
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
    async fn next_bid_number(&self) -> Result<String, RestError>;
    /// Inserts the bid only while its rfq is open and inside the bidding window.
    /// Returns false when the rfq no longer accepts bids.
    async fn add_bid(&self, bid: &entities::Bid) -> Result<bool, RestError>;
    async fn get_bid(&self, bid_id: entities::BidId) -> Result<Option<entities::Bid>, RestError>;
    /// The bid of the vendor on the rfq which was not withdrawn, if any.
    async fn get_live_bid(
        &self,
        rfq_id: RfqId,
        vendor_id: ProfileId,
    ) -> Result<Option<entities::Bid>, RestError>;
    async fn get_bids(&self, filter: entities::BidFilter) -> Result<Vec<entities::Bid>, RestError>;
    async fn get_vendor_bids(
        &self,
        vendor_id: ProfileId,
    ) -> Result<Vec<entities::VendorBid>, RestError>;
    async fn update_bid(
        &self,
        bid: &entities::Bid,
        expected: Vec<entities::BidStatus>,
    ) -> Result<bool, RestError>;
    async fn update_bid_status(
        &self,
        bid_id: entities::BidId,
        expected: Vec<entities::BidStatus>,
        new_status: entities::BidStatus,
    ) -> Result<Option<entities::Bid>, RestError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_next_bid_number",
        fields(
            category = "db_queries",
            result = "success",
            name = "next_bid_number",
            tracing_enabled
        ),
        skip_all
    )]
    async fn next_bid_number(&self) -> Result<String, RestError> {
        let (value,): (i64,) = sqlx::query_as("SELECT nextval('bid_number_seq')")
            .fetch_one(self)
            .await
            .map_err(|e| db_error(e, "Failed to draw bid number"))?;
        Ok(SequencePrefix::Bid.format(value))
    }

    #[instrument(
        target = "metrics",
        name = "db_add_bid",
        fields(
            category = "db_queries",
            result = "success",
            name = "add_bid",
            tracing_enabled
        ),
        skip_all
    )]
    async fn add_bid(&self, bid: &entities::Bid) -> Result<bool, RestError> {
        let inserted = sqlx::query(
            "INSERT INTO bid (id, bid_number, rfq_id, vendor_id, vendor_name, vendor_company, \
             quoted_price, delivery_time, delivery_time_unit, validity_period, comments, \
             specification_overrides, status, submitted_at, updated_at) \
             SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15 \
             WHERE EXISTS (SELECT 1 FROM rfq WHERE id = $3 AND status = $16 AND end_date >= $14 FOR SHARE)",
        )
        .bind(bid.id)
        .bind(&bid.bid_number)
        .bind(bid.rfq_id)
        .bind(bid.vendor_id)
        .bind(&bid.vendor_name)
        .bind(&bid.vendor_company)
        .bind(bid.quoted_price)
        .bind(bid.delivery_time)
        .bind(DeliveryTimeUnit::from(bid.delivery_time_unit))
        .bind(bid.validity_period)
        .bind(&bid.comments)
        .bind(bid.specification_overrides.as_ref().map(Json))
        .bind(BidStatus::from(bid.status))
        .bind(to_db_time(bid.submitted_at))
        .bind(to_db_time(bid.updated_at))
        .bind(RfqStatus::Open)
        .execute(self)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return RestError::InvalidState(DUPLICATE_BID_MESSAGE.to_string());
            }
            db_error(e, "Failed to insert bid")
        })?
        .rows_affected();
        Ok(inserted > 0)
    }

    #[instrument(
        target = "metrics",
        name = "db_get_bid",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_bid",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_bid(&self, bid_id: entities::BidId) -> Result<Option<entities::Bid>, RestError> {
        let bid: Option<Bid> = sqlx::query_as("SELECT * FROM bid WHERE id = $1")
            .bind(bid_id)
            .fetch_optional(self)
            .await
            .map_err(|e| db_error(e, "Failed to fetch bid"))?;
        Ok(bid.map(Into::into))
    }

    #[instrument(
        target = "metrics",
        name = "db_get_live_bid",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_live_bid",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_live_bid(
        &self,
        rfq_id: RfqId,
        vendor_id: ProfileId,
    ) -> Result<Option<entities::Bid>, RestError> {
        let bid: Option<Bid> = sqlx::query_as(
            "SELECT * FROM bid WHERE rfq_id = $1 AND vendor_id = $2 AND status <> $3",
        )
        .bind(rfq_id)
        .bind(vendor_id)
        .bind(BidStatus::Withdrawn)
        .fetch_optional(self)
        .await
        .map_err(|e| db_error(e, "Failed to fetch live bid"))?;
        Ok(bid.map(Into::into))
    }

    #[instrument(
        target = "metrics",
        name = "db_get_bids",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_bids",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_bids(&self, filter: entities::BidFilter) -> Result<Vec<entities::Bid>, RestError> {
        let mut query = QueryBuilder::new("SELECT * FROM bid WHERE TRUE");
        if let Some(rfq_id) = filter.rfq_id {
            query.push(" AND rfq_id = ").push_bind(rfq_id);
        }
        if let Some(vendor_id) = filter.vendor_id {
            query.push(" AND vendor_id = ").push_bind(vendor_id);
        }
        query.push(" ORDER BY submitted_at DESC");
        let bids: Vec<Bid> = query
            .build_query_as()
            .fetch_all(self)
            .await
            .map_err(|e| db_error(e, "Failed to fetch bids"))?;
        Ok(bids.into_iter().map(Into::into).collect())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_vendor_bids",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_vendor_bids",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_vendor_bids(
        &self,
        vendor_id: ProfileId,
    ) -> Result<Vec<entities::VendorBid>, RestError> {
        let rows: Vec<VendorBid> = sqlx::query_as(
            "SELECT bid.*, rfq.rfq_number, rfq.title AS rfq_title, rfq.status AS rfq_status, \
             rfq.end_date AS rfq_end_date FROM bid JOIN rfq ON rfq.id = bid.rfq_id \
             WHERE bid.vendor_id = $1 ORDER BY bid.submitted_at DESC",
        )
        .bind(vendor_id)
        .fetch_all(self)
        .await
        .map_err(|e| db_error(e, "Failed to fetch vendor bids"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(
        target = "metrics",
        name = "db_update_bid",
        fields(
            category = "db_queries",
            result = "success",
            name = "update_bid",
            tracing_enabled
        ),
        skip_all
    )]
    async fn update_bid(
        &self,
        bid: &entities::Bid,
        expected: Vec<entities::BidStatus>,
    ) -> Result<bool, RestError> {
        if expected.is_empty() {
            return Ok(false);
        }
        let mut query = QueryBuilder::new("UPDATE bid SET quoted_price = ");
        query
            .push_bind(bid.quoted_price)
            .push(", delivery_time = ")
            .push_bind(bid.delivery_time)
            .push(", delivery_time_unit = ")
            .push_bind(DeliveryTimeUnit::from(bid.delivery_time_unit))
            .push(", validity_period = ")
            .push_bind(bid.validity_period)
            .push(", comments = ")
            .push_bind(&bid.comments)
            .push(", specification_overrides = ")
            .push_bind(bid.specification_overrides.as_ref().map(Json))
            .push(", updated_at = ")
            .push_bind(to_db_time(bid.updated_at))
            .push(" WHERE id = ")
            .push_bind(bid.id);
        push_status_guard(&mut query, &expected);
        let result = query
            .build()
            .execute(self)
            .await
            .map_err(|e| db_error(e, "Failed to update bid"))?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(
        target = "metrics",
        name = "db_update_bid_status",
        fields(
            category = "db_queries",
            result = "success",
            name = "update_bid_status",
            tracing_enabled
        ),
        skip_all
    )]
    async fn update_bid_status(
        &self,
        bid_id: entities::BidId,
        expected: Vec<entities::BidStatus>,
        new_status: entities::BidStatus,
    ) -> Result<Option<entities::Bid>, RestError> {
        if expected.is_empty() {
            return Ok(None);
        }
        let mut query = QueryBuilder::new("UPDATE bid SET status = ");
        query
            .push_bind(BidStatus::from(new_status))
            .push(", updated_at = ")
            .push_bind(to_db_time(time::OffsetDateTime::now_utc()))
            .push(" WHERE id = ")
            .push_bind(bid_id);
        push_status_guard(&mut query, &expected);
        query.push(" RETURNING *");
        let bid: Option<Bid> = query
            .build_query_as()
            .fetch_optional(self)
            .await
            .map_err(|e| db_error(e, "Failed to update bid status"))?;
        Ok(bid.map(Into::into))
    }
}
