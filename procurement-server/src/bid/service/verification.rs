use {
    crate::{
        api::RestError,
        bid::entities,
        kernel::validation::Validator,
    },
};

const COMMENTS_MAX_LENGTH: usize = 1000;

fn verify_offer(
    quoted_price: f64,
    delivery_time: i64,
    validity_period: Option<i64>,
    comments: Option<&str>,
) -> Result<(), RestError> {
    Validator::new()
        .check(
            quoted_price.is_finite() && quoted_price > 0.0,
            "quoted_price",
            "Quoted price must be greater than 0",
        )
        .check(
            delivery_time >= 1,
            "delivery_time",
            "Delivery time must be a positive integer",
        )
        .check(
            validity_period.map_or(true, |days| days >= 1),
            "validity_period",
            "Validity period must be a positive integer",
        )
        .max_length("comments", comments, COMMENTS_MAX_LENGTH, "Comments")
        .finish()
}

pub fn verify_bid_create(bid_create: &entities::BidCreate) -> Result<(), RestError> {
    verify_offer(
        bid_create.quoted_price,
        bid_create.delivery_time,
        bid_create.validity_period,
        bid_create.comments.as_deref(),
    )
}

pub fn verify_bid_update(bid_update: &entities::BidUpdate) -> Result<(), RestError> {
    verify_offer(
        bid_update.quoted_price,
        bid_update.delivery_time,
        bid_update.validity_period,
        bid_update.comments.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        procurement_api_types::FieldError,
        uuid::Uuid,
    };

    fn bid_create() -> entities::BidCreate {
        entities::BidCreate {
            rfq_id:                  Uuid::new_v4(),
            quoted_price:            1200.5,
            delivery_time:           2,
            delivery_time_unit:      entities::DeliveryTimeUnit::Weeks,
            validity_period:         None,
            comments:                None,
            specification_overrides: None,
        }
    }

    #[test]
    fn test_valid_bid() {
        assert_eq!(verify_bid_create(&bid_create()), Ok(()));
    }

    #[test]
    fn test_invalid_offer_fields() {
        let create = entities::BidCreate {
            quoted_price: 0.0,
            delivery_time: 0,
            validity_period: Some(0),
            comments: Some("x".repeat(1001)),
            ..bid_create()
        };
        assert_eq!(
            verify_bid_create(&create),
            Err(RestError::ValidationError(vec![
                FieldError::new("quoted_price", "Quoted price must be greater than 0"),
                FieldError::new("delivery_time", "Delivery time must be a positive integer"),
                FieldError::new(
                    "validity_period",
                    "Validity period must be a positive integer"
                ),
                FieldError::new("comments", "Comments must not exceed 1000 characters"),
            ]))
        );
    }

    #[test]
    fn test_nan_price_is_rejected() {
        let create = entities::BidCreate {
            quoted_price: f64::NAN,
            ..bid_create()
        };
        assert!(verify_bid_create(&create).is_err());
    }
}
