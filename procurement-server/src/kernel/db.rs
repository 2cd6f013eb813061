use {
    sqlx::{
        Pool,
        Postgres,
    },
    time::{
        OffsetDateTime,
        PrimitiveDateTime,
        UtcOffset,
    },
};

pub type DB = Pool<Postgres>;

/// Timestamps are stored as UTC in `TIMESTAMP` columns.
pub fn to_db_time(time: OffsetDateTime) -> PrimitiveDateTime {
    let time = time.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(time.date(), time.time())
}

pub fn from_db_time(time: PrimitiveDateTime) -> OffsetDateTime {
    time.assume_offset(UtcOffset::UTC)
}

pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(e) => e.is_unique_violation(),
        _ => false,
    }
}
