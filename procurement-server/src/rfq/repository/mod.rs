use super::entities;

mod add_rfq;
mod delete_rfq;
mod get_rfq;
mod get_rfq_references;
mod get_rfqs;
mod models;
mod update_rfq;
mod update_rfq_status;

pub use models::*;

#[derive(Debug)]
pub struct Repository {
    pub db: Box<dyn Database>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self { db: Box::new(db) }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            api::RestError,
            kernel::test_utils,
        },
    };

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_rfq_round_trip() {
        let db = test_utils::test_db().await;
        let customer = test_utils::customer();
        test_utils::insert_profile(&db, &customer).await;
        let repo = Repository::new(db);

        let rfq = repo
            .add_rfq(test_utils::rfq_create(), &customer)
            .await
            .unwrap();
        let stored = repo.get_rfq(rfq.id).await.unwrap();
        assert_eq!(stored.rfq_number, rfq.rfq_number);
        assert!(stored.rfq_number.starts_with("RFQ-"));
        assert_eq!(stored.title, rfq.title);
        assert_eq!(stored.specifications, rfq.specifications);
        assert_eq!(stored.customer_id, customer.id);
        assert_eq!(stored.customer_name, customer.name);
        assert_eq!(stored.status, entities::RfqStatus::Open);

        let listed = repo
            .get_rfqs(entities::RfqFilter {
                customer_id: Some(customer.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.iter().map(|rfq| rfq.id).collect::<Vec<_>>(), vec![rfq.id]);

        repo.delete_rfq(rfq.id).await.unwrap();
        assert_eq!(repo.get_rfq(rfq.id).await, Err(RestError::RfqNotFound));
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_status_update_is_guarded_by_current_status() {
        let db = test_utils::test_db().await;
        let customer = test_utils::customer();
        test_utils::insert_profile(&db, &customer).await;
        let repo = Repository::new(db);
        let rfq = repo
            .add_rfq(test_utils::rfq_create(), &customer)
            .await
            .unwrap();

        let cancelled = repo
            .update_rfq_status(rfq.id, entities::RfqStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(cancelled.status, entities::RfqStatus::Cancelled);

        assert_eq!(
            repo.update_rfq_status(rfq.id, entities::RfqStatus::Closed)
                .await,
            Err(RestError::InvalidState(
                "RFQ status changed concurrently, cannot move it to closed".to_string()
            ))
        );
        let frozen = entities::Rfq {
            title: "Renamed".to_string(),
            ..cancelled
        };
        assert_eq!(
            repo.update_rfq(&frozen).await,
            Err(RestError::InvalidState(
                "RFQ can no longer be updated".to_string()
            ))
        );
    }
}
