use {
    crate::{
        bid::BidId,
        profile::ProfileId,
        rfq::RfqId,
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

pub type ContractId = Uuid;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Terms can still be edited.
    Draft,
    Active,
    Completed,
    Cancelled,
}

/// Awards the bid: the rfq becomes awarded, the bid accepted and every other live bid rejected.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct ContractCreate {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub rfq_id:         RfqId,
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub bid_id:         BidId,
    #[schema(example = 23500.0)]
    pub contract_value: f64,
    #[schema(example = "2025-06-01T00:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub start_date:     OffsetDateTime,
    #[schema(example = "2025-12-31T00:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub end_date:       OffsetDateTime,
    #[serde(default)]
    pub terms:          Option<String>,
    #[schema(example = "Net 30")]
    #[serde(default)]
    pub payment_terms:  Option<String>,
    #[schema(example = "DAP Rotterdam")]
    #[serde(default)]
    pub delivery_terms: Option<String>,
}

/// Fields left out are kept unchanged.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct ContractUpdate {
    #[serde(default)]
    pub contract_value: Option<f64>,
    #[schema(example = "2025-06-01T00:00:00Z", value_type = Option<String>)]
    #[serde(default, with = "crate::serde::nullable_datetime")]
    pub start_date:     Option<OffsetDateTime>,
    #[schema(example = "2025-12-31T00:00:00Z", value_type = Option<String>)]
    #[serde(default, with = "crate::serde::nullable_datetime")]
    pub end_date:       Option<OffsetDateTime>,
    #[serde(default)]
    pub terms:          Option<String>,
    #[serde(default)]
    pub payment_terms:  Option<String>,
    #[serde(default)]
    pub delivery_terms: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct ContractStatusUpdate {
    #[schema(example = "active")]
    pub status: ContractStatus,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug, PartialEq)]
pub struct Contract {
    #[schema(example = "c0ffee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:              ContractId,
    #[schema(example = "CNT-000003")]
    pub contract_number: String,
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub rfq_id:          RfqId,
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub bid_id:          BidId,
    #[schema(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub customer_id:     ProfileId,
    #[schema(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub vendor_id:       ProfileId,
    pub contract_value:  f64,
    #[schema(example = "2025-06-01T00:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub start_date:      OffsetDateTime,
    #[schema(example = "2025-12-31T00:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub end_date:        OffsetDateTime,
    pub terms:           Option<String>,
    pub payment_terms:   Option<String>,
    pub delivery_terms:  Option<String>,
    pub status:          ContractStatus,
    #[schema(example = "2025-05-20T08:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at:      OffsetDateTime,
    #[schema(example = "2025-05-20T08:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at:      OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct Contracts {
    pub items: Vec<Contract>,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct ContractIdParam {
    #[param(example = "c0ffee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub contract_id: ContractId,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostContract,
    #[strum(serialize = "")]
    GetContracts,
    #[strum(serialize = ":contract_id")]
    GetContract,
    #[strum(serialize = ":contract_id")]
    PutContract,
    #[strum(serialize = ":contract_id/status")]
    PatchContractStatus,
    #[strum(serialize = ":contract_id")]
    DeleteContract,
}

impl Routable for Route {
    fn properties(&self) -> crate::RouteProperties {
        let full_path = crate::full_path(crate::Route::Contract, self);
        let (access_level, method) = match self {
            Route::PostContract => (AccessLevel::Customer, http::Method::POST),
            Route::GetContracts => (AccessLevel::LoggedIn, http::Method::GET),
            Route::GetContract => (AccessLevel::LoggedIn, http::Method::GET),
            Route::PutContract => (AccessLevel::Customer, http::Method::PUT),
            Route::PatchContractStatus => (AccessLevel::Customer, http::Method::PATCH),
            Route::DeleteContract => (AccessLevel::Customer, http::Method::DELETE),
        };
        crate::RouteProperties {
            access_level,
            method,
            full_path,
        }
    }
}
