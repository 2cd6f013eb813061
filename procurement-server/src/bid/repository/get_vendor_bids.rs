use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities,
        models::ProfileId,
    },
};

impl Repository {
    pub async fn get_vendor_bids(
        &self,
        vendor_id: ProfileId,
    ) -> Result<Vec<entities::VendorBid>, RestError> {
        self.db.get_vendor_bids(vendor_id).await
    }
}
