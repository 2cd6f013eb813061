use {
    super::Service,
    crate::{
        api::RestError,
        bid::entities,
        models::Profile,
    },
};

pub struct GetMyBidsInput {
    pub profile: Profile,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(profile_id = %input.profile.id))]
    pub async fn get_my_bids(
        &self,
        input: GetMyBidsInput,
    ) -> Result<Vec<entities::VendorBid>, RestError> {
        if !input.profile.is_vendor() {
            return Err(RestError::Forbidden);
        }
        self.repo.get_vendor_bids(input.profile.id).await
    }
}
