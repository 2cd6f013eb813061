use crate::{
    api::RestError,
    contract::entities,
    kernel::validation::Validator,
};

const TERMS_MAX_LENGTH: usize = 5000;
const SIDE_TERMS_MAX_LENGTH: usize = 1000;

struct ContractFields<'a> {
    contract_value: f64,
    start_date:     time::OffsetDateTime,
    end_date:       time::OffsetDateTime,
    terms:          Option<&'a str>,
    payment_terms:  Option<&'a str>,
    delivery_terms: Option<&'a str>,
}

fn verify_fields(fields: ContractFields) -> Result<(), RestError> {
    Validator::new()
        .check(
            fields.contract_value.is_finite() && fields.contract_value > 0.0,
            "contract_value",
            "Contract value must be greater than 0",
        )
        .check(
            fields.end_date > fields.start_date,
            "end_date",
            "End date must be after start date",
        )
        .max_length("terms", fields.terms, TERMS_MAX_LENGTH, "Terms")
        .max_length(
            "payment_terms",
            fields.payment_terms,
            SIDE_TERMS_MAX_LENGTH,
            "Payment terms",
        )
        .max_length(
            "delivery_terms",
            fields.delivery_terms,
            SIDE_TERMS_MAX_LENGTH,
            "Delivery terms",
        )
        .finish()
}

pub fn verify_contract_create(contract_create: &entities::ContractCreate) -> Result<(), RestError> {
    verify_fields(ContractFields {
        contract_value: contract_create.contract_value,
        start_date:     contract_create.start_date,
        end_date:       contract_create.end_date,
        terms:          contract_create.terms.as_deref(),
        payment_terms:  contract_create.payment_terms.as_deref(),
        delivery_terms: contract_create.delivery_terms.as_deref(),
    })
}

/// Updates are checked on the merged contract so partial date changes stay ordered.
pub fn verify_contract(contract: &entities::Contract) -> Result<(), RestError> {
    verify_fields(ContractFields {
        contract_value: contract.contract_value,
        start_date:     contract.start_date,
        end_date:       contract.end_date,
        terms:          contract.terms.as_deref(),
        payment_terms:  contract.payment_terms.as_deref(),
        delivery_terms: contract.delivery_terms.as_deref(),
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        procurement_api_types::FieldError,
        time::{
            Duration,
            OffsetDateTime,
        },
        uuid::Uuid,
    };

    fn contract_create() -> entities::ContractCreate {
        let now = OffsetDateTime::now_utc();
        entities::ContractCreate {
            rfq_id:         Uuid::new_v4(),
            bid_id:         Uuid::new_v4(),
            contract_value: 21_500.0,
            start_date:     now,
            end_date:       now + Duration::days(60),
            terms:          Some("Standard supply terms".to_string()),
            payment_terms:  None,
            delivery_terms: None,
        }
    }

    #[test]
    fn test_valid_contract() {
        assert_eq!(verify_contract_create(&contract_create()), Ok(()));
    }

    #[test]
    fn test_invalid_contract_fields() {
        let create = contract_create();
        let create = entities::ContractCreate {
            contract_value: -1.0,
            end_date: create.start_date,
            terms: Some("t".repeat(5001)),
            delivery_terms: Some("d".repeat(1001)),
            ..create
        };
        assert_eq!(
            verify_contract_create(&create),
            Err(RestError::ValidationError(vec![
                FieldError::new("contract_value", "Contract value must be greater than 0"),
                FieldError::new("end_date", "End date must be after start date"),
                FieldError::new("terms", "Terms must not exceed 5000 characters"),
                FieldError::new(
                    "delivery_terms",
                    "Delivery terms must not exceed 1000 characters"
                ),
            ]))
        );
    }
}
