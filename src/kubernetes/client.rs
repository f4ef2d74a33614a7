// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Source and destination cluster client creation

use crate::error::{MigrateError, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config as KConfig,
};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Create a Kubernetes client from a kubeconfig file, or from the inferred
/// configuration (`KUBECONFIG`, `~/.kube/config` or in-cluster) when no file is given
#[instrument]
pub async fn create_client(kubeconfig: Option<&Path>) -> Result<Client> {
    let config = match kubeconfig {
        Some(path) => {
            info!("Loading kubeconfig from {}", path.display());
            let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                MigrateError::KubeconfigError(format!(
                    "Failed to read kubeconfig {}: {}",
                    path.display(),
                    e
                ))
            })?;
            config_from_kubeconfig(&contents).await?
        }
        None => KConfig::infer()
            .await
            .map_err(|e| MigrateError::KubeconfigError(format!("Failed to infer config: {}", e)))?,
    };

    debug!("Using cluster {}", config.cluster_url);

    Client::try_from(config)
        .map_err(|e| MigrateError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Build a client configuration from a kubeconfig string
async fn config_from_kubeconfig(kubeconfig: &str) -> Result<KConfig> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| MigrateError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    KConfig::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
        .await
        .map_err(|e| MigrateError::KubeconfigError(format!("Failed to create config: {}", e)))
}
