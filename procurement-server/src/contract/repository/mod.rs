use super::entities;

mod award;
mod contract_exists;
mod delete_contract;
mod get_contract;
mod get_contracts;
mod models;
mod update_contract;
mod update_contract_status;

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
            bid::{
                entities::{
                    Bid,
                    BidStatus,
                },
                repository::Repository as BidRepository,
            },
            kernel::{
                db::DB,
                test_utils,
            },
            models::Profile,
            rfq::{
                entities::{
                    Rfq,
                    RfqStatus,
                },
                repository::Repository as RfqRepository,
            },
        },
    };

    struct Fixture {
        db:       DB,
        customer: Profile,
        rfq_repo: RfqRepository,
        bid_repo: BidRepository,
        repo:     Repository,
        rfq:      Rfq,
        first:    Bid,
        second:   Bid,
    }

    /// An open rfq with two bids from different vendors, quoted at 100 and 80.
    async fn fixture() -> Fixture {
        let db: DB = test_utils::test_db().await;
        let customer = test_utils::customer();
        let first_vendor = test_utils::vendor();
        let second_vendor = test_utils::vendor();
        for profile in [&customer, &first_vendor, &second_vendor] {
            test_utils::insert_profile(&db, profile).await;
        }
        let rfq_repo = RfqRepository::new(db.clone());
        let bid_repo = BidRepository::new(db.clone());
        let rfq = rfq_repo
            .add_rfq(test_utils::rfq_create(), &customer)
            .await
            .unwrap();
        let first = bid_repo
            .add_bid(test_utils::bid_create(rfq.id, 100.0), &first_vendor, 30)
            .await
            .unwrap();
        let second = bid_repo
            .add_bid(test_utils::bid_create(rfq.id, 80.0), &second_vendor, 30)
            .await
            .unwrap();
        Fixture {
            db: db.clone(),
            customer,
            rfq_repo,
            bid_repo,
            repo: Repository::new(db),
            rfq,
            first,
            second,
        }
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_award_accepts_winner_and_rejects_siblings() {
        let f = fixture().await;

        let award = f
            .repo
            .award(
                test_utils::contract_create(f.rfq.id, f.second.id, 80.0),
                f.customer.id,
                f.second.vendor_id,
            )
            .await
            .unwrap();
        assert_eq!(award.rejected_bids, 1);
        assert_eq!(award.contract.status, entities::ContractStatus::Draft);
        assert!(award.contract.contract_number.starts_with("CNT-"));

        assert_eq!(
            f.rfq_repo.get_rfq(f.rfq.id).await.unwrap().status,
            RfqStatus::Awarded
        );
        assert_eq!(
            f.bid_repo.get_bid(f.second.id).await.unwrap().status,
            BidStatus::Accepted
        );
        assert_eq!(
            f.bid_repo.get_bid(f.first.id).await.unwrap().status,
            BidStatus::Rejected
        );

        let stored = f.repo.get_contract(award.contract.id).await.unwrap();
        assert_eq!(stored.contract_number, award.contract.contract_number);
        assert_eq!(stored.customer_id, f.customer.id);
        assert_eq!(stored.vendor_id, f.second.vendor_id);
        assert_eq!(stored.contract_value, 80.0);
        let listed = f
            .repo
            .get_contracts(entities::ContractFilter {
                vendor_id: Some(f.second.vendor_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            listed.iter().map(|contract| contract.id).collect::<Vec<_>>(),
            vec![award.contract.id]
        );
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_second_award_on_same_rfq_fails_and_leaves_no_contract() {
        let f = fixture().await;
        f.repo
            .award(
                test_utils::contract_create(f.rfq.id, f.second.id, 80.0),
                f.customer.id,
                f.second.vendor_id,
            )
            .await
            .unwrap();

        assert_eq!(
            f.repo
                .award(
                    test_utils::contract_create(f.rfq.id, f.first.id, 100.0),
                    f.customer.id,
                    f.first.vendor_id,
                )
                .await,
            Err(RestError::InvalidState(
                "RFQ is no longer open".to_string()
            ))
        );
        assert!(!f.repo.contract_exists(f.rfq.id, f.first.id).await.unwrap());
        assert_eq!(
            f.bid_repo.get_bid(f.first.id).await.unwrap().status,
            BidStatus::Rejected
        );
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_failed_award_rolls_back_every_write() {
        let f = fixture().await;
        f.bid_repo
            .update_bid_status(f.second.id, BidStatus::Withdrawn)
            .await
            .unwrap();

        assert_eq!(
            f.repo
                .award(
                    test_utils::contract_create(f.rfq.id, f.second.id, 80.0),
                    f.customer.id,
                    f.second.vendor_id,
                )
                .await,
            Err(RestError::InvalidState(
                "Bid can no longer be accepted".to_string()
            ))
        );
        assert!(!f.repo.contract_exists(f.rfq.id, f.second.id).await.unwrap());
        assert_eq!(
            f.rfq_repo.get_rfq(f.rfq.id).await.unwrap().status,
            RfqStatus::Open
        );
        assert_eq!(
            f.bid_repo.get_bid(f.first.id).await.unwrap().status,
            BidStatus::Submitted
        );
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_no_bid_is_stored_after_award() {
        let f = fixture().await;
        f.repo
            .award(
                test_utils::contract_create(f.rfq.id, f.second.id, 80.0),
                f.customer.id,
                f.second.vendor_id,
            )
            .await
            .unwrap();

        let late_vendor = test_utils::vendor();
        test_utils::insert_profile(&f.db, &late_vendor).await;
        assert_eq!(
            f.bid_repo
                .add_bid(test_utils::bid_create(f.rfq.id, 70.0), &late_vendor, 30)
                .await,
            Err(RestError::InvalidState(
                "RFQ is not open for bidding".to_string()
            ))
        );
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_contract_edits_and_status_are_guarded() {
        let f = fixture().await;
        let award = f
            .repo
            .award(
                test_utils::contract_create(f.rfq.id, f.second.id, 80.0),
                f.customer.id,
                f.second.vendor_id,
            )
            .await
            .unwrap();

        let edited = entities::Contract {
            terms: Some("Deliveries in two batches".to_string()),
            ..award.contract.clone()
        };
        f.repo.update_contract(&edited).await.unwrap();
        assert_eq!(
            f.repo.get_contract(edited.id).await.unwrap().terms,
            edited.terms
        );

        let active = f
            .repo
            .update_contract_status(edited.id, entities::ContractStatus::Active)
            .await
            .unwrap();
        assert_eq!(active.status, entities::ContractStatus::Active);
        assert_eq!(
            f.repo.update_contract(&edited).await,
            Err(RestError::InvalidState(
                "Only draft contracts can be updated".to_string()
            ))
        );
        assert_eq!(
            f.repo
                .update_contract_status(edited.id, entities::ContractStatus::Draft)
                .await,
            Err(RestError::InvalidState(
                "Contract status changed concurrently, cannot move it to draft".to_string()
            ))
        );

        f.repo.delete_contract(edited.id).await.unwrap();
        assert_eq!(
            f.repo.get_contract(edited.id).await,
            Err(RestError::ContractNotFound)
        );
    }
}
