//! Builds the one long-lived backend client for the process.

use crate::config::{BackendMode, StreamConfig};
use crate::error::{StreamError, StreamResult};
use crate::firehose::FirehoseSink;
use crate::kinesis::KinesisSink;
use crate::sink::RecordSink;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_types::region::Region;
use aws_types::SdkConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// Provider name attached to statically configured credentials.
const STATIC_CREDENTIALS_PROVIDER: &str = "memberstream-static";

/// Resolves the shared AWS SDK configuration.
///
/// SDK-level retries are disabled: a failed call surfaces immediately as a
/// single error. Fails if no region can be resolved from the config or the
/// default provider chain.
pub async fn load_sdk_config(config: &StreamConfig) -> StreamResult<SdkConfig> {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(credentials) = &config.credentials {
        loader = loader.credentials_provider(Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            STATIC_CREDENTIALS_PROVIDER,
        ));
    }
    if let Some(url) = &config.endpoint_url {
        debug!("Using endpoint override {}", url);
        loader = loader.endpoint_url(url.clone());
    }

    let sdk_config = loader.load().await;
    if sdk_config.region().is_none() {
        return Err(StreamError::Config(
            "no AWS region configured; set AWS_REGION".into(),
        ));
    }
    Ok(sdk_config)
}

/// Constructs the sink selected by `config`.
///
/// Called once before serving requests. The returned handle is shared
/// read-only across all concurrent dispatches.
pub async fn connect(config: &StreamConfig) -> StreamResult<Arc<dyn RecordSink>> {
    let sdk_config = load_sdk_config(config).await?;
    let sink: Arc<dyn RecordSink> = match config.mode {
        BackendMode::Firehose => Arc::new(FirehoseSink::from_conf(&sdk_config, &config.stream_name)),
        BackendMode::Kinesis => Arc::new(KinesisSink::from_conf(&sdk_config, &config.stream_name)),
    };
    info!(
        "Connected to {} stream {:?} in {}",
        sink.mode(),
        sink.stream_name(),
        sdk_config
            .region()
            .map(|r| r.as_ref())
            .unwrap_or("unknown region")
    );
    Ok(sink)
}
