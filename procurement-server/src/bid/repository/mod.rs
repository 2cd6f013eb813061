use super::entities;

mod add_bid;
mod get_bid;
mod get_bids;
mod get_live_bid;
mod get_vendor_bids;
mod models;
mod update_bid;
mod update_bid_status;

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
