use {
    strum::AsRefStr,
    time::{
        OffsetDateTime,
        Time,
        UtcOffset,
    },
};

/// Human readable numbering of the persisted documents, e.g. `RFQ-000042`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr)]
pub enum SequencePrefix {
    #[strum(serialize = "RFQ")]
    Rfq,
    #[strum(serialize = "BID")]
    Bid,
    #[strum(serialize = "CNT")]
    Contract,
}

const SEQUENCE_NUMBER_WIDTH: usize = 6;

impl SequencePrefix {
    pub fn format(&self, value: i64) -> String {
        format!(
            "{}-{:0width$}",
            self.as_ref(),
            value,
            width = SEQUENCE_NUMBER_WIDTH
        )
    }
}

/// Dates are compared against the start of the current UTC day.
pub fn start_of_today() -> OffsetDateTime {
    OffsetDateTime::now_utc()
        .to_offset(UtcOffset::UTC)
        .replace_time(Time::MIDNIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_number_format() {
        assert_eq!(SequencePrefix::Rfq.format(1), "RFQ-000001");
        assert_eq!(SequencePrefix::Bid.format(4321), "BID-004321");
        assert_eq!(SequencePrefix::Contract.format(1234567), "CNT-1234567");
    }

    #[test]
    fn test_start_of_today_is_midnight() {
        let today = start_of_today();
        assert_eq!(today.time(), Time::MIDNIGHT);
        assert!(today <= OffsetDateTime::now_utc());
    }
}
