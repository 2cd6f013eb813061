use {
    super::{
        entities,
        service::{
            create_bid::CreateBidInput,
            get_bid::GetBidInput,
            get_bids_by_rfq::GetBidsByRfqInput,
            get_my_bids::GetMyBidsInput,
            update_bid::UpdateBidInput,
            update_bid_status::UpdateBidStatusInput,
            withdraw_bid::WithdrawBidInput,
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
        bid::{
            Bid,
            BidCreate,
            BidIdParam,
            BidStatus,
            BidStatusUpdate,
            BidUpdate,
            Bids,
            DeliveryTimeUnit,
            Route,
            RfqSummary,
            VendorBid,
            VendorBids,
        },
        rfq::RfqIdParam,
        ApiResponse,
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

/// Submit a bid on an open rfq.
///
/// A vendor holds at most one bid per rfq unless the earlier one was withdrawn.
#[utoipa::path(post, path = "/v1/bids",
    security(("bearerAuth" = [])),
    request_body = BidCreate,
    responses(
        (status = 200, description = "The submitted bid", body = ApiResponse<Bid>),
        (status = 400, response = ErrorBodyResponse),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Rfq was not found", body = ErrorBodyResponse),
        (status = 409, description = "Rfq does not accept this bid", body = ErrorBodyResponse),
    ),
    tag = "bid",
)]
pub async fn post_bid(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiJson(bid_create): ApiJson<BidCreate>,
) -> Result<Json<ApiResponse<Bid>>, RestError> {
    let bid = store
        .bid_service
        .create_bid(CreateBidInput {
            bid_create: bid_create.into(),
            profile:    auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        bid.into(),
        "Bid submitted successfully",
    )))
}

/// List the bids placed on an rfq.
///
/// The rfq owner gets every bid, a vendor only their own.
#[utoipa::path(get, path = "/v1/bids/rfq/{rfq_id}",
    security(("bearerAuth" = [])),
    params(RfqIdParam),
    responses(
        (status = 200, description = "Bids ordered from newest to oldest", body = ApiResponse<Bids>),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Rfq was not found", body = ErrorBodyResponse),
    ),
    tag = "bid",
)]
pub async fn get_bids_by_rfq(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<RfqIdParam>,
) -> Result<Json<ApiResponse<Bids>>, RestError> {
    let bids = store
        .bid_service
        .get_bids_by_rfq(GetBidsByRfqInput {
            rfq_id:  params.rfq_id,
            profile: auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::new(Bids {
        items: bids.into_iter().map(Into::into).collect(),
    })))
}

/// List the bids of the calling vendor with a summary of their rfqs.
#[utoipa::path(get, path = "/v1/bids/mine",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Own bids ordered from newest to oldest", body = ApiResponse<VendorBids>),
        (status = 403, response = ErrorBodyResponse),
    ),
    tag = "bid",
)]
pub async fn get_my_bids(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
) -> Result<Json<ApiResponse<VendorBids>>, RestError> {
    let bids = store
        .bid_service
        .get_my_bids(GetMyBidsInput {
            profile: auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::new(VendorBids {
        items: bids.into_iter().map(Into::into).collect(),
    })))
}

#[utoipa::path(get, path = "/v1/bids/{bid_id}",
    security(("bearerAuth" = [])),
    params(BidIdParam),
    responses(
        (status = 200, body = ApiResponse<Bid>),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Bid was not found", body = ErrorBodyResponse),
    ),
    tag = "bid",
)]
pub async fn get_bid(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<BidIdParam>,
) -> Result<Json<ApiResponse<Bid>>, RestError> {
    let bid = store
        .bid_service
        .get_bid(GetBidInput {
            bid_id:  params.bid_id,
            profile: auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::new(bid.into())))
}

/// Change the offer of a submitted bid.
#[utoipa::path(put, path = "/v1/bids/{bid_id}",
    security(("bearerAuth" = [])),
    params(BidIdParam),
    request_body = BidUpdate,
    responses(
        (status = 200, description = "The updated bid", body = ApiResponse<Bid>),
        (status = 400, response = ErrorBodyResponse),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Bid was not found", body = ErrorBodyResponse),
        (status = 409, description = "Bid is no longer submitted", body = ErrorBodyResponse),
    ),
    tag = "bid",
)]
pub async fn put_bid(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<BidIdParam>,
    ApiJson(bid_update): ApiJson<BidUpdate>,
) -> Result<Json<ApiResponse<Bid>>, RestError> {
    let bid = store
        .bid_service
        .update_bid(UpdateBidInput {
            bid_id:     params.bid_id,
            bid_update: bid_update.into(),
            profile:    auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        bid.into(),
        "Bid updated successfully",
    )))
}

/// Record the decision of the rfq owner on a bid.
///
/// Only `under_review` and `rejected` can be set while the rfq is open. Bids are accepted by creating a contract.
#[utoipa::path(patch, path = "/v1/bids/{bid_id}/status",
    security(("bearerAuth" = [])),
    params(BidIdParam),
    request_body = BidStatusUpdate,
    responses(
        (status = 200, description = "The updated bid", body = ApiResponse<Bid>),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Bid was not found", body = ErrorBodyResponse),
        (status = 409, description = "The status change is not allowed", body = ErrorBodyResponse),
    ),
    tag = "bid",
)]
pub async fn patch_bid_status(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<BidIdParam>,
    ApiJson(status_update): ApiJson<BidStatusUpdate>,
) -> Result<Json<ApiResponse<Bid>>, RestError> {
    let bid = store
        .bid_service
        .update_bid_status(UpdateBidStatusInput {
            bid_id:     params.bid_id,
            new_status: status_update.status.into(),
            profile:    auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        bid.into(),
        "Bid status updated successfully",
    )))
}

#[utoipa::path(patch, path = "/v1/bids/{bid_id}/withdraw",
    security(("bearerAuth" = [])),
    params(BidIdParam),
    responses(
        (status = 200, description = "The withdrawn bid", body = ApiResponse<Bid>),
        (status = 403, response = ErrorBodyResponse),
        (status = 404, description = "Bid was not found", body = ErrorBodyResponse),
        (status = 409, description = "Bid can no longer be withdrawn", body = ErrorBodyResponse),
    ),
    tag = "bid",
)]
pub async fn withdraw_bid(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    ApiPath(params): ApiPath<BidIdParam>,
) -> Result<Json<ApiResponse<Bid>>, RestError> {
    let bid = store
        .bid_service
        .withdraw_bid(WithdrawBidInput {
            bid_id:  params.bid_id,
            profile: auth.profile()?,
        })
        .await?;
    Ok(Json(ApiResponse::with_message(
        bid.into(),
        "Bid withdrawn successfully",
    )))
}

pub fn get_routes(store: Arc<StoreNew>) -> Router<Arc<StoreNew>> {
    WrappedRouter::new(store)
        .route(Route::PostBid, post_bid)
        .route(Route::GetBidsByRfq, get_bids_by_rfq)
        .route(Route::GetMyBids, get_my_bids)
        .route(Route::GetBid, get_bid)
        .route(Route::PutBid, put_bid)
        .route(Route::PatchBidStatus, patch_bid_status)
        .route(Route::WithdrawBid, withdraw_bid)
        .router
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

impl From<DeliveryTimeUnit> for entities::DeliveryTimeUnit {
    fn from(unit: DeliveryTimeUnit) -> Self {
        match unit {
            DeliveryTimeUnit::Days => entities::DeliveryTimeUnit::Days,
            DeliveryTimeUnit::Weeks => entities::DeliveryTimeUnit::Weeks,
            DeliveryTimeUnit::Months => entities::DeliveryTimeUnit::Months,
        }
    }
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

impl From<BidCreate> for entities::BidCreate {
    fn from(bid_create: BidCreate) -> Self {
        Self {
            rfq_id:                  bid_create.rfq_id,
            quoted_price:            bid_create.quoted_price,
            delivery_time:           bid_create.delivery_time,
            delivery_time_unit:      bid_create.delivery_time_unit.into(),
            validity_period:         bid_create.validity_period,
            comments:                bid_create.comments,
            specification_overrides: bid_create.specification_overrides,
        }
    }
}

impl From<BidUpdate> for entities::BidUpdate {
    fn from(bid_update: BidUpdate) -> Self {
        Self {
            quoted_price:            bid_update.quoted_price,
            delivery_time:           bid_update.delivery_time,
            delivery_time_unit:      bid_update.delivery_time_unit.into(),
            validity_period:         bid_update.validity_period,
            comments:                bid_update.comments,
            specification_overrides: bid_update.specification_overrides,
        }
    }
}

impl From<entities::Bid> for Bid {
    fn from(bid: entities::Bid) -> Self {
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
            specification_overrides: bid.specification_overrides,
            status:                  bid.status.into(),
            submitted_at:            bid.submitted_at,
            updated_at:              bid.updated_at,
        }
    }
}

impl From<entities::VendorBid> for VendorBid {
    fn from(vendor_bid: entities::VendorBid) -> Self {
        Self {
            bid: vendor_bid.bid.into(),
            rfq: RfqSummary {
                id:         vendor_bid.rfq.id,
                rfq_number: vendor_bid.rfq.rfq_number,
                title:      vendor_bid.rfq.title,
                status:     vendor_bid.rfq.status.into(),
                end_date:   vendor_bid.rfq.end_date,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::kernel::test_utils,
    };

    #[test]
    fn test_vendor_bid_is_flattened() {
        let rfq = test_utils::rfq(test_utils::customer().id);
        let bid = test_utils::bid(rfq.id, test_utils::vendor().id);
        let vendor_bid: VendorBid = entities::VendorBid {
            bid: bid.clone(),
            rfq: entities::RfqSummary {
                id:         rfq.id,
                rfq_number: rfq.rfq_number.clone(),
                title:      rfq.title.clone(),
                status:     rfq.status,
                end_date:   rfq.end_date,
            },
        }
        .into();
        let json = serde_json::to_value(&vendor_bid).unwrap();
        assert_eq!(json["bid_number"], bid.bid_number);
        assert_eq!(json["delivery_time_unit"], "weeks");
        assert_eq!(json["status"], "submitted");
        assert_eq!(json["rfq"]["rfq_number"], rfq.rfq_number);
        assert_eq!(json["rfq"]["status"], "open");
    }
}
