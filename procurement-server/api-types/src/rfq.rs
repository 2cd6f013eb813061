use {
    crate::{
        profile::ProfileId,
        AccessLevel,
        Routable,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    std::collections::BTreeMap,
    strum::AsRefStr,
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub type RfqId = Uuid;
pub type Specifications = BTreeMap<String, String>;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum RfqStatus {
    /// The rfq accepts new bids until its bidding end date.
    Open,
    /// The owner stopped accepting bids.
    Closed,
    /// A bid was accepted and a contract was created for it.
    Awarded,
    /// The owner abandoned the rfq.
    Cancelled,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct RfqCreate {
    /// Short title of the request.
    #[schema(example = "Industrial steel pipes")]
    pub title:             String,
    /// What is being requested.
    #[schema(example = "Seamless carbon steel pipes for a water treatment plant")]
    pub description:       String,
    #[schema(example = "Raw Materials")]
    pub category:          String,
    #[schema(example = 500)]
    pub quantity:          i64,
    #[schema(example = "pieces")]
    pub unit:              String,
    /// Budget the customer expects to spend, if disclosed.
    #[schema(example = 25000.0)]
    #[serde(default)]
    pub estimated_budget:  Option<f64>,
    #[schema(example = "Plant 4, 12 Harbour Road, Rotterdam")]
    pub delivery_location: String,
    /// Delivery date formatted in rfc3339.
    #[schema(example = "2025-06-30T00:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub delivery_date:     OffsetDateTime,
    /// Start of the bidding window formatted in rfc3339. Defaults to the creation time.
    #[schema(example = "2025-05-01T00:00:00Z", value_type = Option<String>)]
    #[serde(default, with = "crate::serde::nullable_datetime")]
    pub start_date:        Option<OffsetDateTime>,
    /// End of the bidding window formatted in rfc3339.
    #[schema(example = "2025-05-31T00:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub end_date:          OffsetDateTime,
    #[serde(default)]
    pub specifications:    Specifications,
    /// References to attached documents.
    #[serde(default)]
    pub attachments:       Vec<String>,
}

/// Fields left out are kept unchanged.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct RfqUpdate {
    #[serde(default)]
    pub title:             Option<String>,
    #[serde(default)]
    pub description:       Option<String>,
    #[serde(default)]
    pub category:          Option<String>,
    #[serde(default)]
    pub quantity:          Option<i64>,
    #[serde(default)]
    pub unit:              Option<String>,
    #[serde(default)]
    pub estimated_budget:  Option<f64>,
    #[serde(default)]
    pub delivery_location: Option<String>,
    #[schema(example = "2025-06-30T00:00:00Z", value_type = Option<String>)]
    #[serde(default, with = "crate::serde::nullable_datetime")]
    pub delivery_date:     Option<OffsetDateTime>,
    #[schema(example = "2025-05-31T00:00:00Z", value_type = Option<String>)]
    #[serde(default, with = "crate::serde::nullable_datetime")]
    pub end_date:          Option<OffsetDateTime>,
    #[serde(default)]
    pub specifications:    Option<Specifications>,
    #[serde(default)]
    pub attachments:       Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug, PartialEq)]
pub struct Rfq {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:                RfqId,
    #[schema(example = "RFQ-000042")]
    pub rfq_number:        String,
    pub title:             String,
    pub description:       String,
    pub category:          String,
    pub quantity:          i64,
    pub unit:              String,
    pub estimated_budget:  Option<f64>,
    pub delivery_location: String,
    #[schema(example = "2025-06-30T00:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub delivery_date:     OffsetDateTime,
    #[schema(example = "2025-05-01T00:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub start_date:        OffsetDateTime,
    #[schema(example = "2025-05-31T00:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub end_date:          OffsetDateTime,
    pub status:            RfqStatus,
    #[schema(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub customer_id:       ProfileId,
    /// Name of the customer at the time the rfq was created.
    #[schema(example = "John Doe")]
    pub customer_name:     String,
    pub specifications:    Specifications,
    pub attachments:       Vec<String>,
    #[schema(example = "2025-04-20T09:30:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at:        OffsetDateTime,
    #[schema(example = "2025-04-20T09:30:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at:        OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct Rfqs {
    pub items: Vec<Rfq>,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug, Default)]
pub struct GetRfqsQueryParams {
    /// Only return rfqs in this status.
    #[param(example = "open", value_type = Option<String>)]
    #[serde(default)]
    pub status:   Option<RfqStatus>,
    /// Only return rfqs of this category.
    #[param(example = "Raw Materials")]
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct RfqIdParam {
    #[param(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub rfq_id: RfqId,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostRfq,
    #[strum(serialize = "")]
    GetRfqs,
    #[strum(serialize = "open")]
    GetOpenRfqs,
    #[strum(serialize = "mine")]
    GetMyRfqs,
    #[strum(serialize = ":rfq_id")]
    GetRfq,
    #[strum(serialize = ":rfq_id")]
    PutRfq,
    #[strum(serialize = ":rfq_id")]
    DeleteRfq,
    #[strum(serialize = ":rfq_id/close")]
    CloseRfq,
    #[strum(serialize = ":rfq_id/cancel")]
    CancelRfq,
}

impl Routable for Route {
    fn properties(&self) -> crate::RouteProperties {
        let full_path = crate::full_path(crate::Route::Rfq, self);
        let (access_level, method) = match self {
            Route::PostRfq => (AccessLevel::Customer, http::Method::POST),
            Route::GetRfqs => (AccessLevel::LoggedIn, http::Method::GET),
            Route::GetOpenRfqs => (AccessLevel::LoggedIn, http::Method::GET),
            Route::GetMyRfqs => (AccessLevel::Customer, http::Method::GET),
            Route::GetRfq => (AccessLevel::LoggedIn, http::Method::GET),
            Route::PutRfq => (AccessLevel::Customer, http::Method::PUT),
            Route::DeleteRfq => (AccessLevel::Customer, http::Method::DELETE),
            Route::CloseRfq => (AccessLevel::Customer, http::Method::PATCH),
            Route::CancelRfq => (AccessLevel::Customer, http::Method::PATCH),
        };
        crate::RouteProperties {
            access_level,
            method,
            full_path,
        }
    }
}
