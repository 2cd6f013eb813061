#[double]
use crate::bid::service::Service as BidService;
#[double]
use crate::contract::service::Service as ContractService;
#[double]
use crate::rfq::service::Service as RfqService;
use {
    crate::{
        api::RestError,
        kernel::db::{
            is_unique_violation,
            to_db_time,
            DB,
        },
        models,
    },
    axum_prometheus::metrics_exporter_prometheus::PrometheusHandle,
    base64::{
        engine::general_purpose::URL_SAFE_NO_PAD,
        Engine,
    },
    mockall_double::double,
    procurement_api_types::profile as profile_api,
    rand::Rng,
    std::{
        collections::HashMap,
        str::FromStr,
        sync::Arc,
    },
    time::OffsetDateTime,
    tokio::sync::RwLock,
    tracing::instrument,
    uuid::Uuid,
};

const ACCESS_TOKEN_BYTES: usize = 32;

pub struct Store {
    pub db:               DB,
    pub secret_key:       String,
    pub access_tokens:    RwLock<HashMap<models::AccessTokenToken, models::Profile>>,
    pub metrics_recorder: PrometheusHandle,
}

pub struct StoreNew {
    pub store:            Arc<Store>,
    pub rfq_service:      Arc<RfqService>,
    pub bid_service:      Arc<BidService>,
    pub contract_service: Arc<ContractService>,
}

impl StoreNew {
    pub fn new(
        store: Arc<Store>,
        rfq_service: Arc<RfqService>,
        bid_service: Arc<BidService>,
        contract_service: Arc<ContractService>,
    ) -> Self {
        Self {
            store,
            rfq_service,
            bid_service,
            contract_service,
        }
    }
}

pub fn generate_access_token() -> models::AccessTokenToken {
    let bytes: [u8; ACCESS_TOKEN_BYTES] = rand::thread_rng().gen();
    models::AccessTokenToken(URL_SAFE_NO_PAD.encode(bytes))
}

impl Store {
    pub fn new(db: DB, secret_key: String, metrics_recorder: PrometheusHandle) -> Self {
        Self {
            db,
            secret_key,
            access_tokens: RwLock::new(HashMap::new()),
            metrics_recorder,
        }
    }

    #[instrument(
        target = "metrics",
        name = "db_create_profile",
        fields(
            category = "db_queries",
            result = "success",
            name = "create_profile",
            tracing_enabled
        ),
        skip_all
    )]
    pub async fn create_profile(
        &self,
        create_profile: profile_api::CreateProfile,
    ) -> Result<models::Profile, RestError> {
        let name = create_profile.name.trim();
        if name.is_empty() {
            return Err(RestError::BadParameters("Name is required".to_string()));
        }
        let email = email_address::EmailAddress::from_str(create_profile.email.trim())
            .map_err(|_| RestError::BadParameters("Invalid email".to_string()))?;
        let role = match create_profile.role {
            profile_api::ProfileRole::Customer => models::ProfileRole::Customer,
            profile_api::ProfileRole::Vendor => models::ProfileRole::Vendor,
        };
        let now = to_db_time(OffsetDateTime::now_utc());
        sqlx::query_as(
            "INSERT INTO profile (id, name, email, company, role, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, TRUE, $6, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(models::EmailAddress(email))
        .bind(create_profile.company.map(|company| company.trim().to_string()))
        .bind(role)
        .bind(now)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return RestError::BadParameters("Profile with this email already exists".to_string());
            }
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), "DB: Failed to insert profile");
            RestError::TemporarilyUnavailable
        })
    }

    pub async fn get_profile_by_email(
        &self,
        email: email_address::EmailAddress,
    ) -> Result<Option<models::Profile>, RestError> {
        sqlx::query_as("SELECT * FROM profile WHERE email = $1")
            .bind(models::EmailAddress(email))
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to fetch profile by email");
                RestError::TemporarilyUnavailable
            })
    }

    pub async fn get_profile_by_id(
        &self,
        profile_id: models::ProfileId,
    ) -> Result<models::Profile, RestError> {
        sqlx::query_as("SELECT * FROM profile WHERE id = $1")
            .bind(profile_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = e.to_string(),
                    profile_id = profile_id.to_string(),
                    "DB: Failed to fetch profile"
                );
                RestError::TemporarilyUnavailable
            })?
            .ok_or(RestError::ProfileNotFound)
    }

    /// Marks the profile inactive and drops its cached tokens so the next request re-checks the profile.
    pub async fn deactivate_profile(
        &self,
        profile_id: models::ProfileId,
    ) -> Result<models::Profile, RestError> {
        let profile: models::Profile = sqlx::query_as(
            "UPDATE profile SET is_active = FALSE, updated_at = $2 WHERE id = $1 RETURNING *",
        )
        .bind(profile_id)
        .bind(to_db_time(OffsetDateTime::now_utc()))
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            tracing::error!(
                error = e.to_string(),
                profile_id = profile_id.to_string(),
                "DB: Failed to deactivate profile"
            );
            RestError::TemporarilyUnavailable
        })?
        .ok_or(RestError::ProfileNotFound)?;

        self.access_tokens
            .write()
            .await
            .retain(|_, cached| cached.id != profile_id);
        Ok(profile)
    }

    /// Returns the live token of the profile, creating one if there is none. The flag is true for a new token.
    pub async fn get_or_create_access_token(
        &self,
        profile_id: models::ProfileId,
    ) -> Result<(models::AccessToken, bool), RestError> {
        let profile = self.get_profile_by_id(profile_id).await?;
        if !profile.is_active {
            return Err(RestError::InactiveAccount);
        }

        let existing: Option<models::AccessToken> = sqlx::query_as(
            "SELECT * FROM access_token WHERE profile_id = $1 AND revoked_at IS NULL",
        )
        .bind(profile_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            tracing::error!(error = e.to_string(), "DB: Failed to fetch access token");
            RestError::TemporarilyUnavailable
        })?;
        if let Some(token) = existing {
            return Ok((token, false));
        }

        let token: models::AccessToken = sqlx::query_as(
            "INSERT INTO access_token (id, token, profile_id, created_at) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(generate_access_token())
        .bind(profile_id)
        .bind(to_db_time(OffsetDateTime::now_utc()))
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            tracing::error!(error = e.to_string(), "DB: Failed to insert access token");
            RestError::TemporarilyUnavailable
        })?;

        self.access_tokens
            .write()
            .await
            .insert(token.token.clone(), profile);
        Ok((token, true))
    }

    pub async fn revoke_access_token(
        &self,
        token: &models::AccessTokenToken,
    ) -> Result<(), RestError> {
        sqlx::query("UPDATE access_token SET revoked_at = $2 WHERE token = $1 AND revoked_at IS NULL")
            .bind(token)
            .bind(to_db_time(OffsetDateTime::now_utc()))
            .execute(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to revoke access token");
                RestError::TemporarilyUnavailable
            })?;

        self.access_tokens.write().await.remove(token);
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_profile_by_token",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_profile_by_token",
            tracing_enabled
        ),
        skip_all
    )]
    pub async fn get_profile_by_token(
        &self,
        token: &models::AccessTokenToken,
    ) -> Result<models::Profile, RestError> {
        if let Some(profile) = self.access_tokens.read().await.get(token) {
            return Ok(profile.clone());
        }

        let profile: models::Profile = sqlx::query_as(
            "SELECT profile.* FROM profile JOIN access_token ON access_token.profile_id = profile.id \
             WHERE access_token.token = $1 AND access_token.revoked_at IS NULL",
        )
        .bind(token)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), "DB: Failed to fetch profile by token");
            RestError::TemporarilyUnavailable
        })?
        .ok_or(RestError::Unauthorized)?;

        if !profile.is_active {
            return Err(RestError::InactiveAccount);
        }

        self.access_tokens
            .write()
            .await
            .insert(token.clone(), profile.clone());
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_tokens_are_random_url_safe_strings() {
        let first = generate_access_token();
        let second = generate_access_token();
        assert_ne!(first, second);
        let decoded = URL_SAFE_NO_PAD.decode(first.0.as_bytes()).unwrap();
        assert_eq!(decoded.len(), ACCESS_TOKEN_BYTES);
        assert!(!first.0.contains('+') && !first.0.contains('/') && !first.0.contains('='));
    }
}
