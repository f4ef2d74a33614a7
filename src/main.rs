// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use k8s_openapi::api::rbac::v1::ClusterRoleBinding;
use kube::Api;
use tracing::info;

use crb_migrate::config::Config;
use crb_migrate::kubernetes::create_client;
use crb_migrate::migrate::{copy_cluster_roles, Migrator};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting ClusterRoleBinding migration");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: namespace_mapping={:?}, dry_run={}",
        config.namespace_mapping, config.dry_run
    );

    // Create clients for both clusters
    let (source, destination) = tokio::try_join!(
        create_client(config.source_kubeconfig.as_deref()),
        create_client(config.destination_kubeconfig.as_deref())
    )?;
    info!("Connected to source and destination clusters");

    let migrator = Migrator::new(
        Api::<ClusterRoleBinding>::all(source.clone()),
        Api::<ClusterRoleBinding>::all(destination.clone()),
        config.namespace_mapping.clone(),
        config.dry_run,
    );
    let summary = migrator.run().await?;

    let created = copy_cluster_roles(
        &source,
        migrator.source(),
        &destination,
        &summary.cluster_roles,
        &config.source_namespaces(),
        config.dry_run,
    )
    .await?;
    info!("Created {} cluster roles on the destination", created.len());

    info!("Migration summary: {}", serde_json::to_string(&summary)?);

    if summary.failed > 0 {
        anyhow::bail!("{} cluster role bindings failed to migrate", summary.failed);
    }
    Ok(())
}
