// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ClusterRole copying utilities

use crate::constants::FIELD_MANAGER;
use crate::error::{MigrateError, Result};
use k8s_openapi::api::rbac::v1::ClusterRole;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, info, instrument};

/// Ensure a ClusterRole exists in the cluster, create it from `role` if it doesn't.
///
/// Returns whether the role was created. An existing role is never modified.
#[instrument(skip(client, role), fields(cluster_role = %role.name_any()))]
pub async fn ensure_cluster_role_exists(client: &Client, role: &ClusterRole) -> Result<bool> {
    let cluster_roles: Api<ClusterRole> = Api::all(client.clone());
    let name = role.name_any();

    match cluster_roles.get(&name).await {
        Ok(_) => {
            debug!("Cluster role {} already exists", name);
            Ok(false)
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            info!("Creating cluster role {}", name);
            let pp = PostParams {
                field_manager: Some(FIELD_MANAGER.to_string()),
                ..Default::default()
            };
            cluster_roles
                .create(&pp, &copy_cluster_role(role))
                .await?;
            info!("Cluster role {} created successfully", name);
            Ok(true)
        }
        Err(e) => Err(MigrateError::ClusterRoleError(format!(
            "Failed to check/create cluster role {}: {}",
            name, e
        ))),
    }
}

/// Copy a ClusterRole without the fields the source cluster populated
fn copy_cluster_role(role: &ClusterRole) -> ClusterRole {
    ClusterRole {
        metadata: ObjectMeta {
            name: role.metadata.name.clone(),
            labels: role.metadata.labels.clone(),
            annotations: role.metadata.annotations.clone(),
            ..Default::default()
        },
        rules: role.rules.clone(),
        aggregation_rule: role.aggregation_rule.clone(),
    }
}
