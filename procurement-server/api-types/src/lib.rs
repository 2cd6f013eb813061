use {
    ::serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    utoipa::{
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub mod bid;
pub mod contract;
pub mod profile;
pub mod rfq;
pub mod serde;

/// The envelope every successful response is wrapped in.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct ApiResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    /// Describes what the request changed, if anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "RFQ created successfully")]
    pub message: Option<String>,
    pub data:    T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// The payload of a successful delete.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct Deleted {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id: Uuid,
}

/// A single rejected field of a request body.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// The name of the offending field.
    #[schema(example = "end_date")]
    pub field:   String,
    /// Why the field was rejected.
    #[schema(example = "Bidding end date must be before delivery date")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field:   field.into(),
            message: message.into(),
        }
    }
}

#[derive(ToResponse, ToSchema, Serialize, Deserialize, Debug)]
#[response(description = "An error occurred processing the request")]
pub struct ErrorBodyResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error:   String,
    /// The rejected fields, present only for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields:  Vec<FieldError>,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "v1")]
    V1,
    #[strum(serialize = "rfqs")]
    Rfq,
    #[strum(serialize = "bids")]
    Bid,
    #[strum(serialize = "contracts")]
    Contract,
    #[strum(serialize = "profiles")]
    Profile,
    #[strum(serialize = "")]
    Root,
    #[strum(serialize = "live")]
    Liveness,
    #[strum(serialize = "docs")]
    Docs,
    #[strum(serialize = "docs/openapi.json")]
    OpenApi,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum AccessLevel {
    /// Only the server operator holding the secret key.
    Admin,
    /// Any authenticated profile with the customer role.
    Customer,
    /// Any authenticated profile with the vendor role.
    Vendor,
    /// Any authenticated profile.
    LoggedIn,
    Public,
}

pub struct RouteProperties {
    pub access_level: AccessLevel,
    pub method:       http::Method,
    pub full_path:    String,
}

pub trait Routable: AsRef<str> + Clone {
    fn properties(&self) -> RouteProperties;
}

pub(crate) fn full_path(resource: Route, route: &impl AsRef<str>) -> String {
    format!(
        "{}{}{}",
        Route::V1.as_ref(),
        resource.as_ref(),
        route.as_ref()
    )
    .trim_end_matches('/')
    .to_string()
}
