use {
    crate::{
        api::RestError,
        models::ProfileId,
        rfq::entities::{
            RfqId,
            RfqStatus,
            Specifications,
        },
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type BidId = Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum BidStatus {
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
    Withdrawn,
}

impl BidStatus {
    pub const ALL: [BidStatus; 5] = [
        BidStatus::Submitted,
        BidStatus::UnderReview,
        BidStatus::Accepted,
        BidStatus::Rejected,
        BidStatus::Withdrawn,
    ];

    /// Statuses the rfq owner may move a bid to. Acceptance only happens through an award.
    pub const SETTABLE_BY_CUSTOMER: [BidStatus; 2] = [BidStatus::UnderReview, BidStatus::Rejected];

    pub fn allowed_next(&self) -> &'static [BidStatus] {
        match self {
            BidStatus::Submitted => &[
                BidStatus::UnderReview,
                BidStatus::Accepted,
                BidStatus::Rejected,
                BidStatus::Withdrawn,
            ],
            BidStatus::UnderReview => &[
                BidStatus::Accepted,
                BidStatus::Rejected,
                BidStatus::Withdrawn,
            ],
            BidStatus::Accepted | BidStatus::Rejected | BidStatus::Withdrawn => &[],
        }
    }

    pub fn can_transition_to(&self, next: BidStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn predecessors(next: BidStatus) -> Vec<BidStatus> {
        Self::ALL
            .into_iter()
            .filter(|status| status.can_transition_to(next))
            .collect()
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }

    pub fn non_terminal() -> Vec<BidStatus> {
        Self::ALL
            .into_iter()
            .filter(|status| !status.is_terminal())
            .collect()
    }

    pub fn check_transition(&self, next: BidStatus) -> Result<(), RestError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(RestError::InvalidState(format!(
                "Cannot change bid status from {} to {}",
                self.as_ref(),
                next.as_ref()
            )))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryTimeUnit {
    Days,
    Weeks,
    Months,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bid {
    pub id:                      BidId,
    pub bid_number:              String,
    pub rfq_id:                  RfqId,
    pub vendor_id:               ProfileId,
    pub vendor_name:             String,
    pub vendor_company:          Option<String>,
    pub quoted_price:            f64,
    pub delivery_time:           i64,
    pub delivery_time_unit:      DeliveryTimeUnit,
    /// Days the quote stays valid.
    pub validity_period:         i64,
    pub comments:                Option<String>,
    pub specification_overrides: Option<Specifications>,
    pub status:                  BidStatus,
    pub submitted_at:            OffsetDateTime,
    pub updated_at:              OffsetDateTime,
}

impl Bid {
    pub fn is_owned_by(&self, profile_id: ProfileId) -> bool {
        self.vendor_id == profile_id
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BidCreate {
    pub rfq_id:                  RfqId,
    pub quoted_price:            f64,
    pub delivery_time:           i64,
    pub delivery_time_unit:      DeliveryTimeUnit,
    pub validity_period:         Option<i64>,
    pub comments:                Option<String>,
    pub specification_overrides: Option<Specifications>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BidUpdate {
    pub quoted_price:            f64,
    pub delivery_time:           i64,
    pub delivery_time_unit:      DeliveryTimeUnit,
    pub validity_period:         Option<i64>,
    pub comments:                Option<String>,
    pub specification_overrides: Option<Specifications>,
}

impl BidUpdate {
    /// The offer terms are replaced, a missing validity period keeps the current one.
    pub fn merge(self, bid: &Bid, now: OffsetDateTime) -> Bid {
        Bid {
            quoted_price: self.quoted_price,
            delivery_time: self.delivery_time,
            delivery_time_unit: self.delivery_time_unit,
            validity_period: self.validity_period.unwrap_or(bid.validity_period),
            comments: self.comments,
            specification_overrides: self.specification_overrides,
            updated_at: now,
            ..bid.clone()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BidFilter {
    pub rfq_id:    Option<RfqId>,
    pub vendor_id: Option<ProfileId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RfqSummary {
    pub id:         RfqId,
    pub rfq_number: String,
    pub title:      String,
    pub status:     RfqStatus,
    pub end_date:   OffsetDateTime,
}

/// A bid together with the rfq it was placed on.
#[derive(Clone, Debug, PartialEq)]
pub struct VendorBid {
    pub bid: Bid,
    pub rfq: RfqSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_transition_table() {
        use BidStatus::*;
        assert!(Submitted.can_transition_to(UnderReview));
        assert!(Submitted.can_transition_to(Withdrawn));
        assert!(UnderReview.can_transition_to(Accepted));
        assert!(UnderReview.can_transition_to(Withdrawn));
        assert!(!UnderReview.can_transition_to(Submitted));
        assert!(!UnderReview.can_transition_to(UnderReview));
        for next in BidStatus::ALL {
            assert!(!Accepted.can_transition_to(next));
            assert!(!Rejected.can_transition_to(next));
            assert!(!Withdrawn.can_transition_to(next));
        }
        assert_eq!(BidStatus::non_terminal(), vec![Submitted, UnderReview]);
        assert_eq!(BidStatus::predecessors(Accepted), vec![Submitted, UnderReview]);
    }

    #[test]
    fn test_merge_replaces_offer_terms() {
        let bid = crate::kernel::test_utils::bid(Uuid::new_v4(), Uuid::new_v4());
        let now = OffsetDateTime::now_utc();
        let merged = BidUpdate {
            quoted_price:            19_000.0,
            delivery_time:           10,
            delivery_time_unit:      DeliveryTimeUnit::Days,
            validity_period:         None,
            comments:                Some("Includes transport".to_string()),
            specification_overrides: None,
        }
        .merge(&bid, now);
        assert_eq!(merged.quoted_price, 19_000.0);
        assert_eq!(merged.delivery_time_unit, DeliveryTimeUnit::Days);
        assert_eq!(merged.validity_period, bid.validity_period);
        assert_eq!(merged.rfq_id, bid.rfq_id);
        assert_eq!(merged.bid_number, bid.bid_number);
        assert_eq!(merged.status, BidStatus::Submitted);
        assert_eq!(merged.updated_at, now);
    }
}
