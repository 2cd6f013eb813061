use {
    crate::{
        api::RestError,
        bid::entities::BidId,
        models::ProfileId,
        rfq::entities::RfqId,
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type ContractId = Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 4] = [
        ContractStatus::Draft,
        ContractStatus::Active,
        ContractStatus::Completed,
        ContractStatus::Cancelled,
    ];

    pub fn allowed_next(&self) -> &'static [ContractStatus] {
        match self {
            ContractStatus::Draft => &[ContractStatus::Active, ContractStatus::Cancelled],
            ContractStatus::Active => &[ContractStatus::Completed, ContractStatus::Cancelled],
            ContractStatus::Completed | ContractStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: ContractStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn predecessors(next: ContractStatus) -> Vec<ContractStatus> {
        Self::ALL
            .into_iter()
            .filter(|status| status.can_transition_to(next))
            .collect()
    }

    pub fn check_transition(&self, next: ContractStatus) -> Result<(), RestError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(RestError::InvalidState(format!(
                "Cannot change contract status from {} to {}",
                self.as_ref(),
                next.as_ref()
            )))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Contract {
    pub id:              ContractId,
    pub contract_number: String,
    pub rfq_id:          RfqId,
    pub bid_id:          BidId,
    pub customer_id:     ProfileId,
    pub vendor_id:       ProfileId,
    pub contract_value:  f64,
    pub start_date:      OffsetDateTime,
    pub end_date:        OffsetDateTime,
    pub terms:           Option<String>,
    pub payment_terms:   Option<String>,
    pub delivery_terms:  Option<String>,
    pub status:          ContractStatus,
    pub created_at:      OffsetDateTime,
    pub updated_at:      OffsetDateTime,
}

impl Contract {
    pub fn is_party(&self, profile_id: ProfileId) -> bool {
        self.customer_id == profile_id || self.vendor_id == profile_id
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContractCreate {
    pub rfq_id:         RfqId,
    pub bid_id:         BidId,
    pub contract_value: f64,
    pub start_date:     OffsetDateTime,
    pub end_date:       OffsetDateTime,
    pub terms:          Option<String>,
    pub payment_terms:  Option<String>,
    pub delivery_terms: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContractUpdate {
    pub contract_value: Option<f64>,
    pub start_date:     Option<OffsetDateTime>,
    pub end_date:       Option<OffsetDateTime>,
    pub terms:          Option<String>,
    pub payment_terms:  Option<String>,
    pub delivery_terms: Option<String>,
}

impl ContractUpdate {
    pub fn merge(self, contract: &Contract, now: OffsetDateTime) -> Contract {
        Contract {
            contract_value: self.contract_value.unwrap_or(contract.contract_value),
            start_date: self.start_date.unwrap_or(contract.start_date),
            end_date: self.end_date.unwrap_or(contract.end_date),
            terms: self.terms.or_else(|| contract.terms.clone()),
            payment_terms: self
                .payment_terms
                .or_else(|| contract.payment_terms.clone()),
            delivery_terms: self
                .delivery_terms
                .or_else(|| contract.delivery_terms.clone()),
            updated_at: now,
            ..contract.clone()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContractFilter {
    pub customer_id: Option<ProfileId>,
    pub vendor_id:   Option<ProfileId>,
}

/// Outcome of awarding an rfq to one of its bids.
#[derive(Clone, Debug, PartialEq)]
pub struct Award {
    pub contract:      Contract,
    /// Competing bids which were rejected by the award.
    pub rejected_bids: u64,
}
