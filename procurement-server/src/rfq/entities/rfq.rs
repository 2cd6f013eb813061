use {
    crate::{
        api::RestError,
        models::ProfileId,
    },
    std::collections::BTreeMap,
    strum::AsRefStr,
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type RfqId = Uuid;
pub type Specifications = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RfqStatus {
    Open,
    Closed,
    Awarded,
    Cancelled,
}

impl RfqStatus {
    pub const ALL: [RfqStatus; 4] = [
        RfqStatus::Open,
        RfqStatus::Closed,
        RfqStatus::Awarded,
        RfqStatus::Cancelled,
    ];

    /// Closing is accepted again on a closed rfq.
    pub fn allowed_next(&self) -> &'static [RfqStatus] {
        match self {
            RfqStatus::Open => &[RfqStatus::Closed, RfqStatus::Awarded, RfqStatus::Cancelled],
            RfqStatus::Closed => &[RfqStatus::Closed, RfqStatus::Cancelled],
            RfqStatus::Awarded | RfqStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: RfqStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    /// Every status `next` can be reached from in one step.
    pub fn predecessors(next: RfqStatus) -> Vec<RfqStatus> {
        Self::ALL
            .into_iter()
            .filter(|status| status.can_transition_to(next))
            .collect()
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }

    pub fn check_transition(&self, next: RfqStatus) -> Result<(), RestError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(RestError::InvalidState(format!(
                "Cannot change RFQ status from {} to {}",
                self.as_ref(),
                next.as_ref()
            )))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rfq {
    pub id:                RfqId,
    pub rfq_number:        String,
    pub title:             String,
    pub description:       String,
    pub category:          String,
    pub quantity:          i64,
    pub unit:              String,
    pub estimated_budget:  Option<f64>,
    pub delivery_location: String,
    pub delivery_date:     OffsetDateTime,
    pub start_date:        OffsetDateTime,
    pub end_date:          OffsetDateTime,
    pub status:            RfqStatus,
    pub customer_id:       ProfileId,
    /// Snapshot taken at creation, never refreshed.
    pub customer_name:     String,
    pub specifications:    Specifications,
    pub attachments:       Vec<String>,
    pub created_at:        OffsetDateTime,
    pub updated_at:        OffsetDateTime,
}

impl Rfq {
    pub fn is_owned_by(&self, profile_id: ProfileId) -> bool {
        self.customer_id == profile_id
    }

    pub fn check_accepts_bids(&self, now: OffsetDateTime) -> Result<(), RestError> {
        if self.status != RfqStatus::Open {
            return Err(RestError::InvalidState(
                "RFQ is not open for bidding".to_string(),
            ));
        }
        if now > self.end_date {
            return Err(RestError::InvalidState(
                "RFQ bidding period has ended".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RfqCreate {
    pub title:             String,
    pub description:       String,
    pub category:          String,
    pub quantity:          i64,
    pub unit:              String,
    pub estimated_budget:  Option<f64>,
    pub delivery_location: String,
    pub delivery_date:     OffsetDateTime,
    pub start_date:        Option<OffsetDateTime>,
    pub end_date:          OffsetDateTime,
    pub specifications:    Specifications,
    pub attachments:       Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RfqUpdate {
    pub title:             Option<String>,
    pub description:       Option<String>,
    pub category:          Option<String>,
    pub quantity:          Option<i64>,
    pub unit:              Option<String>,
    pub estimated_budget:  Option<f64>,
    pub delivery_location: Option<String>,
    pub delivery_date:     Option<OffsetDateTime>,
    pub end_date:          Option<OffsetDateTime>,
    pub specifications:    Option<Specifications>,
    pub attachments:       Option<Vec<String>>,
}

impl RfqUpdate {
    /// The rfq as it looks once the supplied fields replaced the current ones.
    pub fn merge(self, rfq: &Rfq, now: OffsetDateTime) -> Rfq {
        Rfq {
            title: self.title.unwrap_or_else(|| rfq.title.clone()),
            description: self
                .description
                .unwrap_or_else(|| rfq.description.clone()),
            category: self.category.unwrap_or_else(|| rfq.category.clone()),
            quantity: self.quantity.unwrap_or(rfq.quantity),
            unit: self.unit.unwrap_or_else(|| rfq.unit.clone()),
            estimated_budget: self.estimated_budget.or(rfq.estimated_budget),
            delivery_location: self
                .delivery_location
                .unwrap_or_else(|| rfq.delivery_location.clone()),
            delivery_date: self.delivery_date.unwrap_or(rfq.delivery_date),
            end_date: self.end_date.unwrap_or(rfq.end_date),
            specifications: self
                .specifications
                .unwrap_or_else(|| rfq.specifications.clone()),
            attachments: self
                .attachments
                .unwrap_or_else(|| rfq.attachments.clone()),
            updated_at: now,
            ..rfq.clone()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RfqFilter {
    pub status:      Option<RfqStatus>,
    pub category:    Option<String>,
    pub customer_id: Option<ProfileId>,
    /// Only rfqs whose bidding window has not ended at this time.
    pub open_at:     Option<OffsetDateTime>,
}

/// What still points at an rfq.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RfqReferences {
    pub bids:      i64,
    pub contracts: i64,
}

impl RfqReferences {
    pub fn is_empty(&self) -> bool {
        self.bids == 0 && self.contracts == 0
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::Duration,
    };

    #[test]
    fn test_rfq_transition_table() {
        use RfqStatus::*;
        assert!(Open.can_transition_to(Closed));
        assert!(Open.can_transition_to(Awarded));
        assert!(Open.can_transition_to(Cancelled));
        assert!(!Open.can_transition_to(Open));
        assert!(Closed.can_transition_to(Closed));
        assert!(Closed.can_transition_to(Cancelled));
        assert!(!Closed.can_transition_to(Awarded));
        assert!(!Closed.can_transition_to(Open));
        for next in RfqStatus::ALL {
            assert!(!Awarded.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
        assert!(Awarded.is_terminal());
        assert!(!Closed.is_terminal());
    }

    #[test]
    fn test_rfq_predecessors() {
        use RfqStatus::*;
        assert_eq!(RfqStatus::predecessors(Awarded), vec![Open]);
        assert_eq!(RfqStatus::predecessors(Closed), vec![Open, Closed]);
        assert_eq!(RfqStatus::predecessors(Cancelled), vec![Open, Closed]);
        assert!(RfqStatus::predecessors(Open).is_empty());
    }

    #[test]
    fn test_rfq_check_transition_message() {
        assert_eq!(
            RfqStatus::Awarded.check_transition(RfqStatus::Closed),
            Err(RestError::InvalidState(
                "Cannot change RFQ status from awarded to closed".to_string()
            ))
        );
    }

    #[test]
    fn test_update_merge_keeps_missing_fields() {
        let now = OffsetDateTime::now_utc();
        let rfq = crate::kernel::test_utils::rfq(Uuid::new_v4());
        let merged = RfqUpdate {
            title: Some("Galvanised steel pipes".to_string()),
            end_date: Some(rfq.end_date + Duration::days(1)),
            ..Default::default()
        }
        .merge(&rfq, now);
        assert_eq!(merged.title, "Galvanised steel pipes");
        assert_eq!(merged.end_date, rfq.end_date + Duration::days(1));
        assert_eq!(merged.description, rfq.description);
        assert_eq!(merged.status, rfq.status);
        assert_eq!(merged.rfq_number, rfq.rfq_number);
        assert_eq!(merged.updated_at, now);
    }

    #[test]
    fn test_accepts_bids() {
        let rfq = crate::kernel::test_utils::rfq(Uuid::new_v4());
        assert!(rfq.check_accepts_bids(OffsetDateTime::now_utc()).is_ok());
        assert_eq!(
            rfq.check_accepts_bids(rfq.end_date + Duration::seconds(1)),
            Err(RestError::InvalidState(
                "RFQ bidding period has ended".to_string()
            ))
        );
        let closed = Rfq {
            status: RfqStatus::Closed,
            ..rfq
        };
        assert_eq!(
            closed.check_accepts_bids(OffsetDateTime::now_utc()),
            Err(RestError::InvalidState(
                "RFQ is not open for bidding".to_string()
            ))
        );
    }
}
