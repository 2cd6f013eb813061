use {
    super::{
        entities,
        service::{
            cancel_rfq::CancelRfqInput,
            close_rfq::CloseRfqInput,
            create_rfq::CreateRfqInput,
            delete_rfq::DeleteRfqInput,
            get_my_rfqs::GetMyRfqsInput,
            get_open_rfqs::GetOpenRfqsInput,
            get_rfq::GetRfqInput,
            get_rfqs::GetRfqsInput,
            update_rfq::UpdateRfqInput,
        },
    },
    crate::{
        api::{
            ApiJson,
            ApiPath,
            ApiQuery,
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
        rfq::{
            GetRfqsQueryParams,
            Rfq,
            RfqCreate,
            RfqIdParam,
            RfqStatus,
            RfqUpdate,
            Rfqs,
            Route,
        },
        ApiResponse,
        Deleted,
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

/// Create a new rfq owned by the calling customer.
#[utoipa::path(post, path = "/v1/rfqs",
    security(("bearerAuth" = [])),
    request_body = RfqCreate,
    responses(
        (status = 200, description = "The created rfq", body = ApiResponse<Rfq>),
        (status = 400, response = ErrorBodyResponse),
        (status = 403, response = ErrorBodyResponse),
    ),
    tag = "rfq",
)]
pub async fn post_rfq(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiJson(rfq_create): ApiJson<RfqCreate>,
) -> Result<Json<ApiResponse<Rfq>>, RestError> {
    let rfq = store
        .rfq_service
        .create_rfq(CreateRfqInput {
            rfq_create: rfq_create.into(),
            profile:    auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        rfq.into(),
        "RFQ created successfully",
    )))
}

/// List rfqs, optionally filtered by status and category.
#[utoipa::path(get, path = "/v1/rfqs",
    security(("bearerAuth" = [])),
    params(GetRfqsQueryParams),
    responses(
        (status = 200, description = "Rfqs ordered from newest to oldest", body = ApiResponse<Rfqs>),
        (status = 400, response = ErrorBodyResponse),
    ),
    tag = "rfq",
)]
pub async fn get_rfqs(
    State(store): State<Arc<StoreNew>>,
    ApiQuery(params): ApiQuery<GetRfqsQueryParams>,
) -> Result<Json<ApiResponse<Rfqs>>, RestError> {
    let rfqs = store
        .rfq_service
        .get_rfqs(GetRfqsInput {
            status:   params.status.map(Into::into),
            category: params.category,
        })
        .await?;
    Ok(Json(ApiResponse::new(to_rfqs(rfqs))))
}

/// List rfqs which are still accepting bids.
#[utoipa::path(get, path = "/v1/rfqs/open",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Open rfqs ordered from newest to oldest", body = ApiResponse<Rfqs>),
    ),
    tag = "rfq",
)]
pub async fn get_open_rfqs(
    State(store): State<Arc<StoreNew>>,
) -> Result<Json<ApiResponse<Rfqs>>, RestError> {
    let rfqs = store
        .rfq_service
        .get_open_rfqs(GetOpenRfqsInput {})
        .await?;
    Ok(Json(ApiResponse::new(to_rfqs(rfqs))))
}

/// List the rfqs of the calling customer.
#[utoipa::path(get, path = "/v1/rfqs/mine",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Own rfqs ordered from newest to oldest", body = ApiResponse<Rfqs>),
        (status = 403, response = ErrorBodyResponse),
    ),
    tag = "rfq",
)]
pub async fn get_my_rfqs(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
) -> Result<Json<ApiResponse<Rfqs>>, RestError> {
    let rfqs = store
        .rfq_service
        .get_my_rfqs(GetMyRfqsInput {
            profile: auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::new(to_rfqs(rfqs))))
}

#[utoipa::path(get, path = "/v1/rfqs/{rfq_id}",
    security(("bearerAuth" = [])),
    params(RfqIdParam),
    responses(
        (status = 200, body = ApiResponse<Rfq>),
        (status = 404, description = "Rfq was not found", body = ErrorBodyResponse),
    ),
    tag = "rfq",
)]
pub async fn get_rfq(
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<RfqIdParam>,
) -> Result<Json<ApiResponse<Rfq>>, RestError> {
    let rfq = store
        .rfq_service
        .get_rfq(GetRfqInput {
            rfq_id: params.rfq_id,
        })
        .await?;
    Ok(Json(ApiResponse::new(rfq.into())))
}

/// Replace the supplied fields of an rfq. The status is left unchanged.
#[utoipa::path(put, path = "/v1/rfqs/{rfq_id}",
    security(("bearerAuth" = [])),
    params(RfqIdParam),
    request_body = RfqUpdate,
    responses(
        (status = 200, description = "The updated rfq", body = ApiResponse<Rfq>),
        (status = 400, response = ErrorBodyResponse),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Rfq was not found", body = ErrorBodyResponse),
        (status = 409, description = "Rfq can no longer be updated", body = ErrorBodyResponse),
    ),
    tag = "rfq",
)]
pub async fn put_rfq(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<RfqIdParam>,
    ApiJson(rfq_update): ApiJson<RfqUpdate>,
) -> Result<Json<ApiResponse<Rfq>>, RestError> {
    let rfq = store
        .rfq_service
        .update_rfq(UpdateRfqInput {
            rfq_id:     params.rfq_id,
            rfq_update: rfq_update.into(),
            profile:    auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        rfq.into(),
        "RFQ updated successfully",
    )))
}

#[utoipa::path(delete, path = "/v1/rfqs/{rfq_id}",
    security(("bearerAuth" = [])),
    params(RfqIdParam),
    responses(
        (status = 200, description = "The id of the deleted rfq", body = ApiResponse<Deleted>),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Rfq was not found", body = ErrorBodyResponse),
        (status = 409, description = "Rfq is still referenced", body = ErrorBodyResponse),
    ),
    tag = "rfq",
)]
pub async fn delete_rfq(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<RfqIdParam>,
) -> Result<Json<ApiResponse<Deleted>>, RestError> {
    store
        .rfq_service
        .delete_rfq(DeleteRfqInput {
            rfq_id:  params.rfq_id,
            profile: auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        Deleted { id: params.rfq_id },
        "RFQ deleted successfully",
    )))
}

/// Stop accepting bids for an rfq.
#[utoipa::path(patch, path = "/v1/rfqs/{rfq_id}/close",
    security(("bearerAuth" = [])),
    params(RfqIdParam),
    responses(
        (status = 200, description = "The closed rfq", body = ApiResponse<Rfq>),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Rfq was not found", body = ErrorBodyResponse),
        (status = 409, description = "Rfq can not be closed", body = ErrorBodyResponse),
    ),
    tag = "rfq",
)]
pub async fn close_rfq(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<RfqIdParam>,
) -> Result<Json<ApiResponse<Rfq>>, RestError> {
    let rfq = store
        .rfq_service
        .close_rfq(CloseRfqInput {
            rfq_id:  params.rfq_id,
            profile: auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        rfq.into(),
        "RFQ closed successfully",
    )))
}

#[utoipa::path(patch, path = "/v1/rfqs/{rfq_id}/cancel",
    security(("bearerAuth" = [])),
    params(RfqIdParam),
    responses(
        (status = 200, description = "The cancelled rfq", body = ApiResponse<Rfq>),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Rfq was not found", body = ErrorBodyResponse),
        (status = 409, description = "Rfq can not be cancelled", body = ErrorBodyResponse),
    ),
    tag = "rfq",
)]
pub async fn cancel_rfq(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<RfqIdParam>,
) -> Result<Json<ApiResponse<Rfq>>, RestError> {
    let rfq = store
        .rfq_service
        .cancel_rfq(CancelRfqInput {
            rfq_id:  params.rfq_id,
            profile: auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        rfq.into(),
        "RFQ cancelled successfully",
    )))
}

pub fn get_routes(store: Arc<StoreNew>) -> Router<Arc<StoreNew>> {
    WrappedRouter::new(store)
        .route(Route::PostRfq, post_rfq)
        .route(Route::GetRfqs, get_rfqs)
        .route(Route::GetOpenRfqs, get_open_rfqs)
        .route(Route::GetMyRfqs, get_my_rfqs)
        .route(Route::GetRfq, get_rfq)
        .route(Route::PutRfq, put_rfq)
        .route(Route::DeleteRfq, delete_rfq)
        .route(Route::CloseRfq, close_rfq)
        .route(Route::CancelRfq, cancel_rfq)
        .router
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

impl From<RfqCreate> for entities::RfqCreate {
    fn from(rfq_create: RfqCreate) -> Self {
        Self {
            title:             rfq_create.title,
            description:       rfq_create.description,
            category:          rfq_create.category,
            quantity:          rfq_create.quantity,
            unit:              rfq_create.unit,
            estimated_budget:  rfq_create.estimated_budget,
            delivery_location: rfq_create.delivery_location,
            delivery_date:     rfq_create.delivery_date,
            start_date:        rfq_create.start_date,
            end_date:          rfq_create.end_date,
            specifications:    rfq_create.specifications,
            attachments:       rfq_create.attachments,
        }
    }
}

impl From<RfqUpdate> for entities::RfqUpdate {
    fn from(rfq_update: RfqUpdate) -> Self {
        Self {
            title:             rfq_update.title,
            description:       rfq_update.description,
            category:          rfq_update.category,
            quantity:          rfq_update.quantity,
            unit:              rfq_update.unit,
            estimated_budget:  rfq_update.estimated_budget,
            delivery_location: rfq_update.delivery_location,
            delivery_date:     rfq_update.delivery_date,
            end_date:          rfq_update.end_date,
            specifications:    rfq_update.specifications,
            attachments:       rfq_update.attachments,
        }
    }
}

impl From<entities::Rfq> for Rfq {
    fn from(rfq: entities::Rfq) -> Self {
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
            delivery_date:     rfq.delivery_date,
            start_date:        rfq.start_date,
            end_date:          rfq.end_date,
            status:            rfq.status.into(),
            customer_id:       rfq.customer_id,
            customer_name:     rfq.customer_name,
            specifications:    rfq.specifications,
            attachments:       rfq.attachments,
            created_at:        rfq.created_at,
            updated_at:        rfq.updated_at,
        }
    }
}

fn to_rfqs(rfqs: Vec<entities::Rfq>) -> Rfqs {
    Rfqs {
        items: rfqs.into_iter().map(Into::into).collect(),
    }
}
