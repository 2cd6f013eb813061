use {
    crate::{
        api::RestError,
        kernel::validation::Validator,
        rfq::entities,
    },
    time::OffsetDateTime,
};

const TITLE_LENGTH: (usize, usize) = (5, 200);
const DESCRIPTION_LENGTH: (usize, usize) = (10, 2000);
const DELIVERY_LOCATION_LENGTH: (usize, usize) = (5, 500);

fn check_title(validator: &mut Validator, title: &str) {
    validator.text_length("title", title, TITLE_LENGTH.0, TITLE_LENGTH.1, "Title");
}

fn check_description(validator: &mut Validator, description: &str) {
    validator.text_length(
        "description",
        description,
        DESCRIPTION_LENGTH.0,
        DESCRIPTION_LENGTH.1,
        "Description",
    );
}

fn check_delivery_location(validator: &mut Validator, delivery_location: &str) {
    validator.text_length(
        "delivery_location",
        delivery_location,
        DELIVERY_LOCATION_LENGTH.0,
        DELIVERY_LOCATION_LENGTH.1,
        "Delivery location",
    );
}

fn check_quantity(validator: &mut Validator, quantity: i64) {
    validator.check(quantity >= 1, "quantity", "Quantity must be a positive integer");
}

fn check_estimated_budget(validator: &mut Validator, estimated_budget: Option<f64>) {
    validator.check(
        estimated_budget.map_or(true, |budget| budget.is_finite() && budget >= 0.0),
        "estimated_budget",
        "Estimated budget must be a positive number",
    );
}

fn check_delivery_date(validator: &mut Validator, delivery_date: OffsetDateTime, today: OffsetDateTime) {
    validator.not_before(
        "delivery_date",
        delivery_date,
        today,
        "Delivery date must be in the future",
    );
}

fn check_end_date(validator: &mut Validator, end_date: OffsetDateTime, today: OffsetDateTime) {
    validator.not_before("end_date", end_date, today, "End date must be in the future");
}

fn check_window(validator: &mut Validator, end_date: OffsetDateTime, delivery_date: OffsetDateTime) {
    validator.check(
        end_date < delivery_date,
        "end_date",
        "Bidding end date must be before delivery date",
    );
}

pub fn verify_rfq_create(
    rfq_create: &entities::RfqCreate,
    today: OffsetDateTime,
) -> Result<(), RestError> {
    let mut validator = Validator::new();
    check_title(&mut validator, &rfq_create.title);
    check_description(&mut validator, &rfq_create.description);
    validator
        .required_text("category", &rfq_create.category, "Category")
        .required_text("unit", &rfq_create.unit, "Unit");
    check_quantity(&mut validator, rfq_create.quantity);
    check_delivery_location(&mut validator, &rfq_create.delivery_location);
    check_estimated_budget(&mut validator, rfq_create.estimated_budget);
    check_delivery_date(&mut validator, rfq_create.delivery_date, today);
    check_end_date(&mut validator, rfq_create.end_date, today);
    check_window(&mut validator, rfq_create.end_date, rfq_create.delivery_date);
    validator.finish()
}

/// Checks the supplied fields and the bidding window of the rfq they produce.
pub fn verify_rfq_update(
    rfq_update: &entities::RfqUpdate,
    merged: &entities::Rfq,
    today: OffsetDateTime,
) -> Result<(), RestError> {
    let mut validator = Validator::new();
    if let Some(title) = &rfq_update.title {
        check_title(&mut validator, title);
    }
    if let Some(description) = &rfq_update.description {
        check_description(&mut validator, description);
    }
    if let Some(category) = &rfq_update.category {
        validator.required_text("category", category, "Category");
    }
    if let Some(unit) = &rfq_update.unit {
        validator.required_text("unit", unit, "Unit");
    }
    if let Some(quantity) = rfq_update.quantity {
        check_quantity(&mut validator, quantity);
    }
    if let Some(delivery_location) = &rfq_update.delivery_location {
        check_delivery_location(&mut validator, delivery_location);
    }
    if rfq_update.estimated_budget.is_some() {
        check_estimated_budget(&mut validator, rfq_update.estimated_budget);
    }
    if let Some(delivery_date) = rfq_update.delivery_date {
        check_delivery_date(&mut validator, delivery_date, today);
    }
    if let Some(end_date) = rfq_update.end_date {
        check_end_date(&mut validator, end_date, today);
    }
    check_window(&mut validator, merged.end_date, merged.delivery_date);
    validator.finish()
}
