use {
    crate::{
        profile::ProfileId,
        rfq::{
            RfqId,
            RfqStatus,
            Specifications,
        },
        AccessLevel,
        Routable,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub type BidId = Uuid;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    /// The vendor submitted the bid and may still change it.
    Submitted,
    /// The customer is evaluating the bid.
    UnderReview,
    /// The bid won the rfq.
    Accepted,
    Rejected,
    /// The vendor pulled the bid back.
    Withdrawn,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryTimeUnit {
    Days,
    Weeks,
    Months,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct BidCreate {
    /// The rfq this bid is for.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub rfq_id:                  RfqId,
    /// Total price quoted by the vendor.
    #[schema(example = 23500.0)]
    pub quoted_price:            f64,
    #[schema(example = 3)]
    pub delivery_time:           i64,
    pub delivery_time_unit:      DeliveryTimeUnit,
    /// Number of days the quote stays valid. Defaults to 30.
    #[schema(example = 30)]
    #[serde(default)]
    pub validity_period:         Option<i64>,
    #[schema(example = "Price includes shipping to the delivery location")]
    #[serde(default)]
    pub comments:                Option<String>,
    /// Per-key overrides of the rfq specifications.
    #[serde(default)]
    pub specification_overrides: Option<Specifications>,
}

/// Replaces the quote of a submitted bid. The rfq of a bid can not change.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct BidUpdate {
    #[schema(example = 22900.0)]
    pub quoted_price:            f64,
    #[schema(example = 2)]
    pub delivery_time:           i64,
    pub delivery_time_unit:      DeliveryTimeUnit,
    #[schema(example = 30)]
    #[serde(default)]
    pub validity_period:         Option<i64>,
    #[serde(default)]
    pub comments:                Option<String>,
    #[serde(default)]
    pub specification_overrides: Option<Specifications>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct BidStatusUpdate {
    /// The new status of the bid.
    #[schema(example = "under_review")]
    pub status: BidStatus,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug, PartialEq)]
pub struct Bid {
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:                      BidId,
    #[schema(example = "BID-000017")]
    pub bid_number:              String,
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub rfq_id:                  RfqId,
    #[schema(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub vendor_id:               ProfileId,
    /// Name of the vendor at the time the bid was submitted.
    #[schema(example = "Jane Roe")]
    pub vendor_name:             String,
    #[schema(example = "Roe Metals")]
    pub vendor_company:          Option<String>,
    pub quoted_price:            f64,
    pub delivery_time:           i64,
    pub delivery_time_unit:      DeliveryTimeUnit,
    pub validity_period:         i64,
    pub comments:                Option<String>,
    pub specification_overrides: Option<Specifications>,
    pub status:                  BidStatus,
    #[schema(example = "2025-05-02T10:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at:            OffsetDateTime,
    #[schema(example = "2025-05-02T10:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at:              OffsetDateTime,
}

/// The part of an rfq a vendor sees next to their own bids.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RfqSummary {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:         RfqId,
    #[schema(example = "RFQ-000042")]
    pub rfq_number: String,
    pub title:      String,
    pub status:     RfqStatus,
    #[schema(example = "2025-05-31T00:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub end_date:   OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct VendorBid {
    #[serde(flatten)]
    pub bid: Bid,
    pub rfq: RfqSummary,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct Bids {
    pub items: Vec<Bid>,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct VendorBids {
    pub items: Vec<VendorBid>,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct BidIdParam {
    #[param(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub bid_id: BidId,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostBid,
    #[strum(serialize = "rfq/:rfq_id")]
    GetBidsByRfq,
    #[strum(serialize = "mine")]
    GetMyBids,
    #[strum(serialize = ":bid_id")]
    GetBid,
    #[strum(serialize = ":bid_id")]
    PutBid,
    #[strum(serialize = ":bid_id/status")]
    PatchBidStatus,
    #[strum(serialize = ":bid_id/withdraw")]
    WithdrawBid,
}

impl Routable for Route {
    fn properties(&self) -> crate::RouteProperties {
        let full_path = crate::full_path(crate::Route::Bid, self);
        let (access_level, method) = match self {
            Route::PostBid => (AccessLevel::Vendor, http::Method::POST),
            Route::GetBidsByRfq => (AccessLevel::LoggedIn, http::Method::GET),
            Route::GetMyBids => (AccessLevel::Vendor, http::Method::GET),
            Route::GetBid => (AccessLevel::LoggedIn, http::Method::GET),
            Route::PutBid => (AccessLevel::Vendor, http::Method::PUT),
            Route::PatchBidStatus => (AccessLevel::Customer, http::Method::PATCH),
            Route::WithdrawBid => (AccessLevel::Vendor, http::Method::PATCH),
        };
        crate::RouteProperties {
            access_level,
            method,
            full_path,
        }
    }
}
