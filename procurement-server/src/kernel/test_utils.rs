use {
    crate::{
        bid,
        contract,
        kernel::db::{
            to_db_time,
            DB,
        },
        models,
        rfq,
    },
    sqlx::PgPool,
    std::str::FromStr,
    time::{
        Duration,
        OffsetDateTime,
    },
    uuid::Uuid,
};

pub fn profile(role: models::ProfileRole) -> models::Profile {
    let id = Uuid::new_v4();
    let now = to_db_time(OffsetDateTime::now_utc());
    models::Profile {
        id,
        name: format!("Profile {}", &id.to_string()[..8]),
        email: models::EmailAddress(
            email_address::EmailAddress::from_str(&format!("{}@example.com", id))
                .expect("Failed to build test email"),
        ),
        company: Some("Acme Supplies".to_string()),
        role,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn customer() -> models::Profile {
    profile(models::ProfileRole::Customer)
}

pub fn vendor() -> models::Profile {
    profile(models::ProfileRole::Vendor)
}

/// An open rfq with a bidding window ending in a week.
pub fn rfq(customer_id: models::ProfileId) -> rfq::entities::Rfq {
    let now = OffsetDateTime::now_utc();
    rfq::entities::Rfq {
        id: Uuid::new_v4(),
        rfq_number: "RFQ-000001".to_string(),
        title: "Industrial steel pipes".to_string(),
        description: "Seamless carbon steel pipes for a water treatment plant".to_string(),
        category: "Raw Materials".to_string(),
        quantity: 500,
        unit: "pieces".to_string(),
        estimated_budget: Some(25_000.0),
        delivery_location: "Plant 4, 12 Harbour Road, Rotterdam".to_string(),
        delivery_date: now + Duration::days(30),
        start_date: now,
        end_date: now + Duration::days(7),
        status: rfq::entities::RfqStatus::Open,
        customer_id,
        customer_name: "John Doe".to_string(),
        specifications: Default::default(),
        attachments: vec![],
        created_at: now,
        updated_at: now,
    }
}

pub fn bid(rfq_id: rfq::entities::RfqId, vendor_id: models::ProfileId) -> bid::entities::Bid {
    let now = OffsetDateTime::now_utc();
    bid::entities::Bid {
        id: Uuid::new_v4(),
        bid_number: "BID-000001".to_string(),
        rfq_id,
        vendor_id,
        vendor_name: "Jane Roe".to_string(),
        vendor_company: Some("Roe Metals".to_string()),
        quoted_price: 21_500.0,
        delivery_time: 3,
        delivery_time_unit: bid::entities::DeliveryTimeUnit::Weeks,
        validity_period: 30,
        comments: None,
        specification_overrides: None,
        status: bid::entities::BidStatus::Submitted,
        submitted_at: now,
        updated_at: now,
    }
}

pub fn contract(
    rfq: &rfq::entities::Rfq,
    bid: &bid::entities::Bid,
) -> contract::entities::Contract {
    let now = OffsetDateTime::now_utc();
    contract::entities::Contract {
        id: Uuid::new_v4(),
        contract_number: "CNT-000001".to_string(),
        rfq_id: rfq.id,
        bid_id: bid.id,
        customer_id: rfq.customer_id,
        vendor_id: bid.vendor_id,
        contract_value: bid.quoted_price,
        start_date: now + Duration::days(1),
        end_date: now + Duration::days(90),
        terms: None,
        payment_terms: Some("Net 30".to_string()),
        delivery_terms: None,
        status: contract::entities::ContractStatus::Draft,
        created_at: now,
        updated_at: now,
    }
}

/// Connects to the database named by `TEST_DATABASE_URL` and brings its schema up to date.
/// Tests using it are ignored by default and run with `cargo test -- --ignored`.
pub async fn test_db() -> DB {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/procurement_test".to_string());
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to the test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub async fn insert_profile(db: &DB, profile: &models::Profile) {
    sqlx::query(
        "INSERT INTO profile (id, name, email, company, role, is_active, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(profile.id)
    .bind(&profile.name)
    .bind(&profile.email)
    .bind(&profile.company)
    .bind(profile.role)
    .bind(profile.is_active)
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .execute(db)
    .await
    .expect("Failed to insert profile");
}

pub fn rfq_create() -> rfq::entities::RfqCreate {
    let now = OffsetDateTime::now_utc();
    rfq::entities::RfqCreate {
        title:             "Industrial steel pipes".to_string(),
        description:       "Seamless carbon steel pipes for a water treatment plant".to_string(),
        category:          "Raw Materials".to_string(),
        quantity:          500,
        unit:              "pieces".to_string(),
        estimated_budget:  Some(25_000.0),
        delivery_location: "Plant 4, 12 Harbour Road, Rotterdam".to_string(),
        delivery_date:     now + Duration::days(30),
        start_date:        None,
        end_date:          now + Duration::days(7),
        specifications:    [("grade".to_string(), "ST52".to_string())].into(),
        attachments:       vec![],
    }
}

pub fn bid_create(rfq_id: rfq::entities::RfqId, quoted_price: f64) -> bid::entities::BidCreate {
    bid::entities::BidCreate {
        rfq_id,
        quoted_price,
        delivery_time: 3,
        delivery_time_unit: bid::entities::DeliveryTimeUnit::Weeks,
        validity_period: None,
        comments: None,
        specification_overrides: None,
    }
}

pub fn contract_create(
    rfq_id: rfq::entities::RfqId,
    bid_id: bid::entities::BidId,
    contract_value: f64,
) -> contract::entities::ContractCreate {
    let now = OffsetDateTime::now_utc();
    contract::entities::ContractCreate {
        rfq_id,
        bid_id,
        contract_value,
        start_date: now + Duration::days(1),
        end_date: now + Duration::days(90),
        terms: None,
        payment_terms: Some("Net 30".to_string()),
        delivery_terms: None,
    }
}
