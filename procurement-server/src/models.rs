use {
    sqlx::{
        encode::IsNull,
        error::BoxDynError,
        postgres::{
            PgArgumentBuffer,
            PgTypeInfo,
            PgValueRef,
        },
        types::time::PrimitiveDateTime,
        Decode,
        Encode,
        FromRow,
        Postgres,
        Type,
    },
    std::{
        ops::Deref,
        str::FromStr,
    },
    uuid::Uuid,
};

pub type ProfileId = Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "profile_role", rename_all = "lowercase")]
pub enum ProfileRole {
    Customer,
    Vendor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAddress(pub email_address::EmailAddress);

impl Deref for EmailAddress {
    type Target = email_address::EmailAddress;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Type<Postgres> for EmailAddress {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for EmailAddress {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let value = <&str as Decode<Postgres>>::decode(value)?;
        Ok(EmailAddress(email_address::EmailAddress::from_str(value)?))
    }
}

impl<'q> Encode<'q, Postgres> for EmailAddress {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> IsNull {
        <&str as Encode<Postgres>>::encode(self.0.as_str(), buf)
    }
}

#[derive(Clone, Debug, FromRow, PartialEq)]
pub struct Profile {
    pub id:         ProfileId,
    pub name:       String,
    pub email:      EmailAddress,
    pub company:    Option<String>,
    pub role:       ProfileRole,
    pub is_active:  bool,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl Profile {
    pub fn is_customer(&self) -> bool {
        self.role == ProfileRole::Customer
    }

    pub fn is_vendor(&self) -> bool {
        self.role == ProfileRole::Vendor
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct AccessTokenToken(pub String);

#[derive(Clone, Debug, FromRow)]
pub struct AccessToken {
    pub id:         Uuid,
    pub token:      AccessTokenToken,
    pub profile_id: ProfileId,
    pub revoked_at: Option<PrimitiveDateTime>,
    pub created_at: PrimitiveDateTime,
}
