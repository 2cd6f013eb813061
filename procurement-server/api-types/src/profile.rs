use {
    crate::{
        AccessLevel,
        Routable,
    },
    email_address::EmailAddress,
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub type ProfileId = Uuid;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, ToResponse, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    Customer,
    Vendor,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug)]
pub struct CreateProfile {
    /// The name of the profile to create.
    #[schema(example = "John Doe")]
    pub name:    String,
    /// The email of the profile to create.
    #[schema(example = "example@example.com", value_type = String)]
    pub email:   String,
    /// The company the profile acts for.
    #[schema(example = "Acme Industrial Ltd")]
    #[serde(default)]
    pub company: Option<String>,
    /// The role of the profile to create.
    pub role:    ProfileRole,
}

#[derive(Serialize, Deserialize, Clone, Debug, IntoParams)]
pub struct GetProfile {
    /// The email of the profile to fetch.
    #[param(example = "example@example.com", value_type = String)]
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, IntoParams)]
pub struct ProfileIdParam {
    /// The id of the profile.
    #[param(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub profile_id: ProfileId,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug)]
pub struct Profile {
    /// The id of the profile.
    #[schema(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:        ProfileId,
    /// The name of the profile.
    #[schema(example = "John Doe")]
    pub name:      String,
    /// The email of the profile.
    #[schema(example = "example@example.com", value_type = String)]
    pub email:     EmailAddress,
    /// The company the profile acts for.
    #[schema(example = "Acme Industrial Ltd")]
    pub company:   Option<String>,
    /// The role of the profile.
    pub role:      ProfileRole,
    /// Inactive profiles can not authenticate.
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse)]
pub struct CreateAccessToken {
    /// The id of the profile to create token for.
    #[schema(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub profile_id: ProfileId,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse)]
pub struct AccessToken {
    /// The token for later use.
    #[schema(example = "_q9zUYP-tQg8F7kQi2Rfl5c6sSy7xcc2yWh2H-nI-iI", value_type = String)]
    pub token: String,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostProfile,
    #[strum(serialize = "")]
    GetProfile,
    #[strum(serialize = ":profile_id/deactivate")]
    DeactivateProfile,
    #[strum(serialize = "access_tokens")]
    PostProfileAccessToken,
    #[strum(serialize = "access_tokens")]
    DeleteProfileAccessToken,
}

impl Routable for Route {
    fn properties(&self) -> crate::RouteProperties {
        let full_path = crate::full_path(crate::Route::Profile, self);
        match self {
            Route::PostProfile => crate::RouteProperties {
                access_level: AccessLevel::Admin,
                method: http::Method::POST,
                full_path,
            },
            Route::GetProfile => crate::RouteProperties {
                access_level: AccessLevel::Admin,
                method: http::Method::GET,
                full_path,
            },
            Route::DeactivateProfile => crate::RouteProperties {
                access_level: AccessLevel::Admin,
                method: http::Method::POST,
                full_path,
            },
            Route::PostProfileAccessToken => crate::RouteProperties {
                access_level: AccessLevel::Admin,
                method: http::Method::POST,
                full_path,
            },
            Route::DeleteProfileAccessToken => crate::RouteProperties {
                access_level: AccessLevel::LoggedIn,
                method: http::Method::DELETE,
                full_path,
            },
        }
    }
}
