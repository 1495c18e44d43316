// Keywarden — AWS identity provider
//
// Thin adapters over STS AssumeRole and IAM access-key lifecycle. Each
// exchange builds an STS client scoped to the base identity's keys; the IAM
// client is built once from the ambient environment at startup.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use chrono::{DateTime, Utc};

use super::{IdentityError, IdentityProvider, KeyPair, SessionMaterial, StaticKeys};

pub struct AwsIdentityProvider {
    region: Region,
    iam: aws_sdk_iam::Client,
}

impl AwsIdentityProvider {
    /// Build the provider for `region`. IAM key-lifecycle calls use the
    /// ambient default credential chain; exchange calls never do.
    pub async fn from_env(region: &str) -> Self {
        let region = Region::new(region.to_string());
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region.clone())
            .load()
            .await;

        Self {
            region,
            iam: aws_sdk_iam::Client::new(&config),
        }
    }

    fn sts_client(&self, base: StaticKeys) -> aws_sdk_sts::Client {
        let session_token = if base.session_token.is_empty() {
            None
        } else {
            Some(base.session_token)
        };

        let credentials = aws_sdk_sts::config::Credentials::new(
            base.access_key_id,
            base.secret_access_key,
            session_token,
            None,
            crate::SERVICE,
        );

        let config = aws_sdk_sts::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(self.region.clone())
            .credentials_provider(credentials)
            .build();

        aws_sdk_sts::Client::from_conf(config)
    }
}

#[async_trait]
impl IdentityProvider for AwsIdentityProvider {
    async fn exchange(
        &self,
        base: StaticKeys,
        role_arn: &str,
        ttl: Duration,
        session_name: &str,
    ) -> Result<SessionMaterial, IdentityError> {
        let out = self
            .sts_client(base)
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .duration_seconds(ttl.as_secs() as i32)
            .send()
            .await
            .map_err(|e| IdentityError::Exchange {
                role_arn: role_arn.to_string(),
                reason: e.to_string(),
            })?;

        let credentials = out.credentials().ok_or_else(|| IdentityError::EmptyExchange {
            role_arn: role_arn.to_string(),
        })?;

        Ok(SessionMaterial {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
            expiration: to_chrono(credentials.expiration()),
        })
    }

    async fn create_key(&self) -> Result<KeyPair, IdentityError> {
        let out = self
            .iam
            .create_access_key()
            .send()
            .await
            .map_err(|e| IdentityError::CreateKey(e.to_string()))?;

        let key = out
            .access_key()
            .ok_or_else(|| IdentityError::CreateKey("response carried no access key".to_string()))?;

        Ok(KeyPair {
            access_key_id: key.access_key_id().to_string(),
            secret_access_key: key.secret_access_key().to_string(),
        })
    }

    async fn delete_key(&self, access_key_id: &str) -> Result<(), IdentityError> {
        self.iam
            .delete_access_key()
            .access_key_id(access_key_id)
            .send()
            .await
            .map_err(|e| IdentityError::DeleteKey {
                access_key_id: access_key_id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}

/// STS reports expiration as an epoch instant; an unrepresentable value maps
/// to absent, which the record layer treats as immediately stale.
fn to_chrono(expiration: &aws_sdk_sts::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(expiration.secs(), expiration.subsec_nanos())
}
