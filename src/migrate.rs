// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Migration of ClusterRoleBindings, and the ClusterRoles they grant, between clusters.

use crate::error::Result;
use crate::kubernetes::{ensure_cluster_role_exists, ClusterRoleBindingApi};
use crate::rbac::{
    binding_for_apply, binding_for_collection, binding_relevant, cluster_role_granted,
    merge_and_apply,
};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding};
use kube::{api::ObjectMeta, Api, Client, ResourceExt};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error, info, instrument, warn};

/// Counts of what a migration run did
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSummary {
    /// Bindings found on the source cluster
    pub scanned: usize,
    /// Bindings with subjects in a migrated namespace
    pub collected: usize,
    /// Bindings merged into the destination, or that would be in a dry run
    pub applied: usize,
    pub failed: usize,
    /// ClusterRoles granted by the applied bindings
    pub cluster_roles: BTreeSet<String>,
}

/// Moves the namespace-owned subjects of ClusterRoleBindings from a source to a destination cluster
pub struct Migrator<S, D> {
    source: S,
    destination: D,
    namespace_mapping: BTreeMap<String, String>,
    dry_run: bool,
}

impl<S: ClusterRoleBindingApi, D: ClusterRoleBindingApi> Migrator<S, D> {
    pub fn new(
        source: S,
        destination: D,
        namespace_mapping: BTreeMap<String, String>,
        dry_run: bool,
    ) -> Self {
        Self {
            source,
            destination,
            namespace_mapping,
            dry_run,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Migrate every source binding relevant to a mapped namespace.
    ///
    /// Failing to list the source aborts the run. A binding that fails to migrate
    /// is logged and counted, and the run continues with the next one.
    #[instrument(skip(self), fields(dry_run = self.dry_run))]
    pub async fn run(&self) -> Result<MigrationSummary> {
        let namespaces: BTreeSet<String> = self.namespace_mapping.keys().cloned().collect();
        let bindings = self.source.list().await?;
        let mut summary = MigrationSummary {
            scanned: bindings.len(),
            ..Default::default()
        };

        for binding in &bindings {
            if !namespaces.iter().any(|ns| binding_relevant(binding, ns)) {
                continue;
            }
            summary.collected += 1;

            match self.migrate_binding(binding, &namespaces).await {
                Ok(()) => {
                    summary.applied += 1;
                    summary.cluster_roles.insert(binding.role_ref.name.clone());
                }
                Err(e) => {
                    error!(
                        "Failed to migrate cluster role binding {}: {}",
                        binding.name_any(),
                        e
                    );
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Migrated {} of {} collected cluster role bindings ({} scanned, {} failed)",
            summary.applied, summary.collected, summary.scanned, summary.failed
        );
        Ok(summary)
    }

    #[instrument(skip(self, binding, namespaces), fields(binding = %binding.name_any()))]
    async fn migrate_binding(
        &self,
        binding: &ClusterRoleBinding,
        namespaces: &BTreeSet<String>,
    ) -> Result<()> {
        let collected = binding_for_collection(binding, namespaces);
        let remapped = binding_for_apply(&collected, &self.namespace_mapping)?;
        let prepared = strip_server_fields(&remapped);

        if self.dry_run {
            info!(
                "Dry run: would merge {} subjects into the destination",
                prepared.subjects.as_ref().map_or(0, Vec::len)
            );
            return Ok(());
        }

        merge_and_apply(&self.destination, &prepared).await?;
        Ok(())
    }
}

/// Copy of a binding without the fields the source cluster populated
fn strip_server_fields(binding: &ClusterRoleBinding) -> ClusterRoleBinding {
    ClusterRoleBinding {
        metadata: ObjectMeta {
            name: binding.metadata.name.clone(),
            labels: binding.metadata.labels.clone(),
            annotations: binding.metadata.annotations.clone(),
            ..Default::default()
        },
        role_ref: binding.role_ref.clone(),
        subjects: binding.subjects.clone(),
    }
}

/// Create the named ClusterRoles on the destination when they are relevant to a
/// migrated namespace and missing there. Returns the names of the created roles.
///
/// The source bindings are listed once and scanned for every role and namespace.
#[instrument(skip_all, fields(dry_run = dry_run))]
pub async fn copy_cluster_roles<A: ClusterRoleBindingApi>(
    source: &Client,
    source_bindings: &A,
    destination: &Client,
    names: &BTreeSet<String>,
    namespaces: &BTreeSet<String>,
    dry_run: bool,
) -> Result<Vec<String>> {
    let cluster_roles: Api<ClusterRole> = Api::all(source.clone());
    let bindings = source_bindings.list().await?;
    let mut created = Vec::new();

    for name in names {
        let relevant = namespaces
            .iter()
            .any(|namespace| cluster_role_granted(&bindings, name, namespace));
        if !relevant {
            debug!("Cluster role {} is not granted in a migrated namespace", name);
            continue;
        }

        let Some(role) = cluster_roles.get_opt(name).await? else {
            warn!("Cluster role {} not found on the source cluster", name);
            continue;
        };

        if dry_run {
            info!("Dry run: would ensure cluster role {} exists", name);
            continue;
        }

        if ensure_cluster_role_exists(destination, &role).await? {
            created.push(role.name_any());
        }
    }

    Ok(created)
}
