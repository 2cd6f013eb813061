use {
    crate::{
        bid,
        config::RunOptions,
        contract,
        models,
        rfq,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::StoreNew,
    },
    anyhow::Result,
    axum::{
        async_trait,
        extract::{
            self,
            rejection::{
                JsonRejection,
                PathRejection,
                QueryRejection,
            },
            FromRequest,
            FromRequestParts,
            Path,
            Query,
            State,
        },
        handler::Handler,
        http::{
            request::Parts,
            StatusCode,
        },
        middleware,
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            get,
            on,
            MethodFilter,
        },
        Json,
        Router,
    },
    axum_extra::{
        headers::{
            authorization::Bearer,
            Authorization,
        },
        TypedHeader,
    },
    clap::crate_version,
    procurement_api_types::{
        self as api_types,
        AccessLevel,
        ErrorBodyResponse,
        FieldError,
        Routable,
    },
    std::sync::{
        atomic::Ordering,
        Arc,
    },
    tower_http::cors::CorsLayer,
    utoipa::{
        openapi::security::{
            HttpAuthScheme,
            HttpBuilder,
            SecurityScheme,
        },
        Modify,
        OpenApi,
    },
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

async fn root() -> String {
    format!("Procurement Server API {}", crate_version!())
}

pub mod profile;

#[derive(Debug, Clone, PartialEq)]
pub enum RestError {
    /// The request contained invalid parameters
    BadParameters(String),
    /// One or more fields of the request body were rejected
    ValidationError(Vec<FieldError>),
    /// The rfq was not found
    RfqNotFound,
    /// The bid was not found
    BidNotFound,
    /// The contract was not found
    ContractNotFound,
    /// The profile was not found
    ProfileNotFound,
    /// The caller is not allowed to act on the resource
    Forbidden,
    /// The resource is not in a state which allows the operation
    InvalidState(String),
    /// The request is not authenticated
    Unauthorized,
    /// The profile behind the token was deactivated
    InactiveAccount,
    /// Internal error occurred during processing the request
    TemporarilyUnavailable,
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad parameters: {}", msg))
            }
            RestError::ValidationError(_) => {
                (StatusCode::BAD_REQUEST, "Validation failed".to_string())
            }
            RestError::RfqNotFound => (
                StatusCode::NOT_FOUND,
                "RFQ with the specified id was not found".to_string(),
            ),
            RestError::BidNotFound => (
                StatusCode::NOT_FOUND,
                "Bid with the specified id was not found".to_string(),
            ),
            RestError::ContractNotFound => (
                StatusCode::NOT_FOUND,
                "Contract with the specified id was not found".to_string(),
            ),
            RestError::ProfileNotFound => (
                StatusCode::NOT_FOUND,
                "Profile was not found".to_string(),
            ),
            RestError::Forbidden => (
                StatusCode::FORBIDDEN,
                "You are not allowed to perform this action".to_string(),
            ),
            RestError::InvalidState(msg) => (StatusCode::CONFLICT, msg.clone()),
            RestError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication is required".to_string(),
            ),
            RestError::InactiveAccount => (
                StatusCode::UNAUTHORIZED,
                "Account is deactivated".to_string(),
            ),
            RestError::TemporarilyUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "This service is temporarily unavailable".to_string(),
            ),
        }
    }
}

impl std::fmt::Display for RestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_status_and_message().1)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        let fields = match self {
            RestError::ValidationError(fields) => fields,
            _ => vec![],
        };
        (
            status,
            Json(ErrorBodyResponse {
                success: false,
                error: msg,
                fields,
            }),
        )
            .into_response()
    }
}

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

#[derive(Debug, Clone)]
pub enum Auth {
    Authorized(models::AccessTokenToken, models::Profile),
    Admin,
    Unauthorized,
}

impl Auth {
    pub fn check_access(&self, access_level: AccessLevel) -> Result<(), RestError> {
        match (access_level, self) {
            (AccessLevel::Public, _) => Ok(()),
            (_, Auth::Unauthorized) => Err(RestError::Unauthorized),
            (AccessLevel::Admin, Auth::Admin) => Ok(()),
            (AccessLevel::Admin, _) => Err(RestError::Forbidden),
            (AccessLevel::LoggedIn, Auth::Authorized(_, _)) => Ok(()),
            (AccessLevel::Customer, Auth::Authorized(_, profile)) if profile.is_customer() => Ok(()),
            (AccessLevel::Vendor, Auth::Authorized(_, profile)) if profile.is_vendor() => Ok(()),
            _ => Err(RestError::Forbidden),
        }
    }

    /// The profile acting on the request.
    pub fn profile(&self) -> Result<models::Profile, RestError> {
        match self {
            Auth::Authorized(_, profile) => Ok(profile.clone()),
            Auth::Admin => Err(RestError::Forbidden),
            Auth::Unauthorized => Err(RestError::Unauthorized),
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<StoreNew>> for Auth {
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<StoreNew>,
    ) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(authorization)) => {
                if authorization.token() == state.store.secret_key {
                    return Ok(Auth::Admin);
                }
                let token = models::AccessTokenToken(authorization.token().to_string());
                let profile = state.store.get_profile_by_token(&token).await?;
                Ok(Auth::Authorized(token, profile))
            }
            Err(_) => Ok(Auth::Unauthorized),
        }
    }
}

async fn require_access(
    State((store, access_level)): State<(Arc<StoreNew>, AccessLevel)>,
    request: extract::Request,
    next: middleware::Next,
) -> Result<Response, RestError> {
    let (mut parts, body) = request.into_parts();
    let auth = Auth::from_request_parts(&mut parts, &store).await?;
    auth.check_access(access_level)?;
    Ok(next
        .run(extract::Request::from_parts(parts, body))
        .await)
}

/// Json body whose rejection is reported in the error envelope.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(request: extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(request, state)
            .await
            .map(|Json(value)| ApiJson(value))
            .map_err(|rejection| RestError::BadParameters(rejection.body_text()))
    }
}

pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ApiQuery(value))
            .map_err(|rejection| RestError::BadParameters(rejection.body_text()))
    }
}

pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| ApiPath(value))
            .map_err(|rejection| RestError::BadParameters(rejection.body_text()))
    }
}

/// Registers handlers under the path, method and access level of their route.
pub struct WrappedRouter {
    store:      Arc<StoreNew>,
    pub router: Router<Arc<StoreNew>>,
}

impl WrappedRouter {
    pub fn new(store: Arc<StoreNew>) -> Self {
        Self {
            store,
            router: Router::new(),
        }
    }

    pub fn route<H, T>(self, route: impl Routable, handler: H) -> Self
    where
        H: Handler<T, Arc<StoreNew>>,
        T: 'static,
    {
        let properties = route.properties();
        let method_filter = MethodFilter::try_from(properties.method)
            .expect("Route method must be a standard http method");
        let method_router = on(method_filter, handler).route_layer(
            middleware::from_fn_with_state(
                (self.store.clone(), properties.access_level),
                require_access,
            ),
        );
        Self {
            router: self.router.route(&properties.full_path, method_router),
            store:  self.store,
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

// Make sure functions included in the paths section have distinct names, otherwise some api generators will fail
#[derive(OpenApi)]
#[openapi(
    paths(
        rfq::api::post_rfq,
        rfq::api::get_rfqs,
        rfq::api::get_open_rfqs,
        rfq::api::get_my_rfqs,
        rfq::api::get_rfq,
        rfq::api::put_rfq,
        rfq::api::delete_rfq,
        rfq::api::close_rfq,
        rfq::api::cancel_rfq,
        bid::api::post_bid,
        bid::api::get_bids_by_rfq,
        bid::api::get_my_bids,
        bid::api::get_bid,
        bid::api::put_bid,
        bid::api::patch_bid_status,
        bid::api::withdraw_bid,
        contract::api::post_contract,
        contract::api::get_contracts,
        contract::api::get_contract,
        contract::api::put_contract,
        contract::api::patch_contract_status,
        contract::api::delete_contract,
        profile::post_profile,
        profile::get_profile,
        profile::deactivate_profile,
        profile::post_profile_access_token,
        profile::delete_profile_access_token,
    ),
    components(
        schemas(
            api_types::FieldError,
            api_types::Deleted,
            api_types::rfq::Rfq,
            api_types::rfq::RfqCreate,
            api_types::rfq::RfqUpdate,
            api_types::rfq::RfqStatus,
            api_types::rfq::Rfqs,
            api_types::bid::Bid,
            api_types::bid::BidCreate,
            api_types::bid::BidUpdate,
            api_types::bid::BidStatus,
            api_types::bid::BidStatusUpdate,
            api_types::bid::DeliveryTimeUnit,
            api_types::bid::Bids,
            api_types::bid::VendorBid,
            api_types::bid::VendorBids,
            api_types::contract::Contract,
            api_types::contract::ContractCreate,
            api_types::contract::ContractUpdate,
            api_types::contract::ContractStatus,
            api_types::contract::ContractStatusUpdate,
            api_types::contract::Contracts,
            api_types::profile::Profile,
            api_types::profile::ProfileRole,
            api_types::profile::CreateProfile,
            api_types::profile::CreateAccessToken,
            api_types::profile::AccessToken,
            ErrorBodyResponse,
        ),
        responses(
            ErrorBodyResponse,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "rfq", description = "Requests for quotation published by customers"),
        (name = "bid", description = "Offers submitted by vendors on open requests"),
        (name = "contract", description = "Awarding a request to a bid and managing the resulting contract"),
        (name = "profile", description = "Customer and vendor profiles and their access tokens"),
    )
)]
struct ApiDoc;

pub fn get_routes(store: Arc<StoreNew>) -> Router<Arc<StoreNew>> {
    Router::new()
        .merge(rfq::api::get_routes(store.clone()))
        .merge(bid::api::get_routes(store.clone()))
        .merge(contract::api::get_routes(store.clone()))
        .merge(profile::get_routes(store))
}

pub async fn start_api(run_options: RunOptions, store: Arc<StoreNew>) -> Result<()> {
    let openapi = ApiDoc::openapi();

    let app: Router<()> = Router::new()
        .merge(Redoc::with_url(
            api_types::Route::Docs.as_ref().to_string(),
            openapi.clone(),
        ))
        .route(
            api_types::Route::OpenApi.as_ref(),
            get(move || async move { Json(openapi) }),
        )
        .merge(get_routes(store.clone()))
        .route(api_types::Route::Root.as_ref(), get(root))
        .route(api_types::Route::Liveness.as_ref(), get(live))
        .layer(CorsLayer::permissive())
        .with_state(store);

    tracing::info!(
        listen_addr = run_options.server.listen_addr.to_string(),
        "Starting API server..."
    );
    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down API server...");
        })
        .await?;
    Ok(())
}
