use {
    super::{
        ApiJson,
        ApiPath,
        ApiQuery,
        Auth,
        RestError,
        WrappedRouter,
    },
    crate::{
        models,
        state::StoreNew,
    },
    axum::{
        extract::State,
        Json,
        Router,
    },
    procurement_api_types::{
        profile::{
            AccessToken,
            CreateAccessToken,
            CreateProfile,
            GetProfile,
            Profile,
            ProfileIdParam,
            ProfileRole,
            Route,
        },
        ApiResponse,
        ErrorBodyResponse,
    },
    std::{
        str::FromStr,
        sync::Arc,
    },
};

impl From<models::ProfileRole> for ProfileRole {
    fn from(role: models::ProfileRole) -> Self {
        match role {
            models::ProfileRole::Customer => ProfileRole::Customer,
            models::ProfileRole::Vendor => ProfileRole::Vendor,
        }
    }
}

impl From<models::Profile> for Profile {
    fn from(profile: models::Profile) -> Self {
        Self {
            id:        profile.id,
            name:      profile.name,
            email:     profile.email.0,
            company:   profile.company,
            role:      profile.role.into(),
            is_active: profile.is_active,
        }
    }
}

/// Create a new profile.
///
/// Returns the created profile object.
#[utoipa::path(post, path = "/v1/profiles",
    security(("bearerAuth" = [])),
    request_body = CreateProfile,
    responses(
        (status = 200, description = "The created profile", body = ApiResponse<Profile>),
        (status = 400, response = ErrorBodyResponse),
    ),
    tag = "profile",
)]
pub async fn post_profile(
    State(store): State<Arc<StoreNew>>,
    ApiJson(params): ApiJson<CreateProfile>,
) -> Result<Json<ApiResponse<Profile>>, RestError> {
    let profile = store.store.create_profile(params).await?;
    Ok(Json(ApiResponse::with_message(
        profile.into(),
        "Profile created successfully",
    )))
}

/// Get a profile by email.
#[utoipa::path(get, path = "/v1/profiles",
    security(("bearerAuth" = [])),
    params(GetProfile),
    responses(
        (status = 200, description = "The profile with the matching email", body = ApiResponse<Profile>),
        (status = 400, response = ErrorBodyResponse),
        (status = 404, description = "Profile was not found", body = ErrorBodyResponse),
    ),
    tag = "profile",
)]
pub async fn get_profile(
    State(store): State<Arc<StoreNew>>,
    ApiQuery(params): ApiQuery<GetProfile>,
) -> Result<Json<ApiResponse<Profile>>, RestError> {
    let email = email_address::EmailAddress::from_str(params.email.trim())
        .map_err(|_| RestError::BadParameters("Invalid email".to_string()))?;
    let profile = store
        .store
        .get_profile_by_email(email)
        .await?
        .ok_or(RestError::ProfileNotFound)?;
    Ok(Json(ApiResponse::new(profile.into())))
}

/// Deactivate a profile.
///
/// Tokens of a deactivated profile stop authenticating immediately.
#[utoipa::path(post, path = "/v1/profiles/{profile_id}/deactivate",
    security(("bearerAuth" = [])),
    params(ProfileIdParam),
    responses(
        (status = 200, description = "The deactivated profile", body = ApiResponse<Profile>),
        (status = 404, description = "Profile was not found", body = ErrorBodyResponse),
    ),
    tag = "profile",
)]
pub async fn deactivate_profile(
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<ProfileIdParam>,
) -> Result<Json<ApiResponse<Profile>>, RestError> {
    let profile = store.store.deactivate_profile(params.profile_id).await?;
    tracing::info!(profile_id = %profile.id, "Profile deactivated");
    Ok(Json(ApiResponse::with_message(
        profile.into(),
        "Profile deactivated successfully",
    )))
}

/// Create a new profile access token if no valid token exists.
///
/// Returns the live token of the profile.
#[utoipa::path(post, path = "/v1/profiles/access_tokens",
    security(("bearerAuth" = [])),
    request_body = CreateAccessToken,
    responses(
        (status = 200, description = "The access token for the profile", body = ApiResponse<AccessToken>),
        (status = 401, description = "Profile is deactivated", body = ErrorBodyResponse),
        (status = 404, description = "Profile was not found", body = ErrorBodyResponse),
    ),
    tag = "profile",
)]
pub async fn post_profile_access_token(
    State(store): State<Arc<StoreNew>>,
    ApiJson(params): ApiJson<CreateAccessToken>,
) -> Result<Json<ApiResponse<AccessToken>>, RestError> {
    let (access_token, _) = store
        .store
        .get_or_create_access_token(params.profile_id)
        .await?;
    Ok(Json(ApiResponse::new(AccessToken {
        token: access_token.token.0,
    })))
}

/// Revoke the access token of the calling profile.
#[utoipa::path(delete, path = "/v1/profiles/access_tokens",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "The token was revoked"),
        (status = 401, response = ErrorBodyResponse),
    ),
    tag = "profile",
)]
pub async fn delete_profile_access_token(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
) -> Result<Json<ApiResponse<()>>, RestError> {
    if let Auth::Authorized(token, _) = auth {
        store.store.revoke_access_token(&token).await?;
    }
    Ok(Json(ApiResponse::with_message(
        (),
        "Access token revoked successfully",
    )))
}

pub fn get_routes(store: Arc<StoreNew>) -> Router<Arc<StoreNew>> {
    WrappedRouter::new(store)
        .route(Route::PostProfile, post_profile)
        .route(Route::GetProfile, get_profile)
        .route(Route::DeactivateProfile, deactivate_profile)
        .route(Route::PostProfileAccessToken, post_profile_access_token)
        .route(Route::DeleteProfileAccessToken, delete_profile_access_token)
        .router
}
