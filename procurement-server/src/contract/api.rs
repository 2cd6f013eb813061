use {
    super::{
        entities,
        service::{
            create_contract::CreateContractInput,
            delete_contract::DeleteContractInput,
            get_contract::GetContractInput,
            get_contracts::GetContractsInput,
            update_contract::UpdateContractInput,
            update_contract_status::UpdateContractStatusInput,
        },
    },
    crate::{
        api::{
            ApiJson,
            ApiPath,
            Auth,
            RestError,
            WrappedRouter,
        },
        state::StoreNew,
    },
    axum::{
        extract::State,
        Json,
        Router,
    },
    procurement_api_types::{
        contract::{
            Contract,
            ContractCreate,
            ContractIdParam,
            ContractStatus,
            ContractStatusUpdate,
            ContractUpdate,
            Contracts,
            Route,
        },
        ApiResponse,
        Deleted,
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

/// Award an rfq to one of its bids.
///
/// The contract is created as a draft. In the same transaction the rfq becomes awarded,
/// the bid accepted and every other live bid on the rfq rejected.
#[utoipa::path(post, path = "/v1/contracts",
    security(("bearerAuth" = [])),
    request_body = ContractCreate,
    responses(
        (status = 200, description = "The drafted contract", body = ApiResponse<Contract>),
        (status = 400, response = ErrorBodyResponse),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Rfq or bid was not found", body = ErrorBodyResponse),
        (status = 409, description = "Rfq or bid can not be awarded", body = ErrorBodyResponse),
    ),
    tag = "contract",
)]
pub async fn post_contract(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiJson(contract_create): ApiJson<ContractCreate>,
) -> Result<Json<ApiResponse<Contract>>, RestError> {
    let award = store
        .contract_service
        .create_contract(CreateContractInput {
            contract_create: contract_create.into(),
            profile:         auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        award.contract.into(),
        "Contract created successfully",
    )))
}

/// List the contracts the caller is a party to.
#[utoipa::path(get, path = "/v1/contracts",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Contracts ordered from newest to oldest", body = ApiResponse<Contracts>),
        (status = 401, response = ErrorBodyResponse),
    ),
    tag = "contract",
)]
pub async fn get_contracts(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
) -> Result<Json<ApiResponse<Contracts>>, RestError> {
    let contracts = store
        .contract_service
        .get_contracts(GetContractsInput {
            profile: auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::new(Contracts {
        items: contracts.into_iter().map(Into::into).collect(),
    })))
}

#[utoipa::path(get, path = "/v1/contracts/{contract_id}",
    security(("bearerAuth" = [])),
    params(ContractIdParam),
    responses(
        (status = 200, body = ApiResponse<Contract>),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Contract was not found", body = ErrorBodyResponse),
    ),
    tag = "contract",
)]
pub async fn get_contract(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<ContractIdParam>,
) -> Result<Json<ApiResponse<Contract>>, RestError> {
    let contract = store
        .contract_service
        .get_contract(GetContractInput {
            contract_id: params.contract_id,
            profile:     auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::new(contract.into())))
}

/// Change the terms of a draft contract.
#[utoipa::path(put, path = "/v1/contracts/{contract_id}",
    security(("bearerAuth" = [])),
    params(ContractIdParam),
    request_body = ContractUpdate,
    responses(
        (status = 200, description = "The updated contract", body = ApiResponse<Contract>),
        (status = 400, response = ErrorBodyResponse),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Contract was not found", body = ErrorBodyResponse),
        (status = 409, description = "Contract is no longer a draft", body = ErrorBodyResponse),
    ),
    tag = "contract",
)]
pub async fn put_contract(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<ContractIdParam>,
    ApiJson(contract_update): ApiJson<ContractUpdate>,
) -> Result<Json<ApiResponse<Contract>>, RestError> {
    let contract = store
        .contract_service
        .update_contract(UpdateContractInput {
            contract_id:     params.contract_id,
            contract_update: contract_update.into(),
            profile:         auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        contract.into(),
        "Contract updated successfully",
    )))
}

#[utoipa::path(patch, path = "/v1/contracts/{contract_id}/status",
    security(("bearerAuth" = [])),
    params(ContractIdParam),
    request_body = ContractStatusUpdate,
    responses(
        (status = 200, description = "The updated contract", body = ApiResponse<Contract>),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Contract was not found", body = ErrorBodyResponse),
        (status = 409, description = "The status change is not allowed", body = ErrorBodyResponse),
    ),
    tag = "contract",
)]
pub async fn patch_contract_status(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<ContractIdParam>,
    ApiJson(status_update): ApiJson<ContractStatusUpdate>,
) -> Result<Json<ApiResponse<Contract>>, RestError> {
    let contract = store
        .contract_service
        .update_contract_status(UpdateContractStatusInput {
            contract_id: params.contract_id,
            new_status:  status_update.status.into(),
            profile:     auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        contract.into(),
        "Contract status updated successfully",
    )))
}

#[utoipa::path(delete, path = "/v1/contracts/{contract_id}",
    security(("bearerAuth" = [])),
    params(ContractIdParam),
    responses(
        (status = 200, description = "The id of the deleted contract", body = ApiResponse<Deleted>),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Contract was not found", body = ErrorBodyResponse),
    ),
    tag = "contract",
)]
pub async fn delete_contract(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<ContractIdParam>,
) -> Result<Json<ApiResponse<Deleted>>, RestError> {
    store
        .contract_service
        .delete_contract(DeleteContractInput {
            contract_id: params.contract_id,
            profile:     auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        Deleted {
            id: params.contract_id,
        },
        "Contract deleted successfully",
    )))
}

pub fn get_routes(store: Arc<StoreNew>) -> Router<Arc<StoreNew>> {
    WrappedRouter::new(store)
        .route(Route::PostContract, post_contract)
        .route(Route::GetContracts, get_contracts)
        .route(Route::GetContract, get_contract)
        .route(Route::PutContract, put_contract)
        .route(Route::PatchContractStatus, patch_contract_status)
        .route(Route::DeleteContract, delete_contract)
        .router
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

impl From<ContractCreate> for entities::ContractCreate {
    fn from(contract_create: ContractCreate) -> Self {
        Self {
            rfq_id:         contract_create.rfq_id,
            bid_id:         contract_create.bid_id,
            contract_value: contract_create.contract_value,
            start_date:     contract_create.start_date,
            end_date:       contract_create.end_date,
            terms:          contract_create.terms,
            payment_terms:  contract_create.payment_terms,
            delivery_terms: contract_create.delivery_terms,
        }
    }
}

impl From<ContractUpdate> for entities::ContractUpdate {
    fn from(contract_update: ContractUpdate) -> Self {
        Self {
            contract_value: contract_update.contract_value,
            start_date:     contract_update.start_date,
            end_date:       contract_update.end_date,
            terms:          contract_update.terms,
            payment_terms:  contract_update.payment_terms,
            delivery_terms: contract_update.delivery_terms,
        }
    }
}

impl From<entities::Contract> for Contract {
    fn from(contract: entities::Contract) -> Self {
        Self {
            id:              contract.id,
            contract_number: contract.contract_number,
            rfq_id:          contract.rfq_id,
            bid_id:          contract.bid_id,
            customer_id:     contract.customer_id,
            vendor_id:       contract.vendor_id,
            contract_value:  contract.contract_value,
            start_date:      contract.start_date,
            end_date:        contract.end_date,
            terms:           contract.terms,
            payment_terms:   contract.payment_terms,
            delivery_terms:  contract.delivery_terms,
            status:          contract.status.into(),
            created_at:      contract.created_at,
            updated_at:      contract.updated_at,
        }
    }
}
