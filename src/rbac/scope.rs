// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deciding whether cluster-scoped RBAC objects are relevant to a namespace

use crate::error::Result;
use crate::kubernetes::ClusterRoleBindingApi;
use crate::rbac::object::binding_from_object;
use crate::rbac::subject::belongs_to_namespace;
use k8s_openapi::api::rbac::v1::ClusterRoleBinding;
use kube::api::DynamicObject;
use tracing::{debug, instrument};

/// Check if any subject of the binding belongs to the namespace
pub fn binding_relevant(binding: &ClusterRoleBinding, namespace: &str) -> bool {
    binding
        .subjects
        .iter()
        .flatten()
        .any(|subject| belongs_to_namespace(subject, namespace))
}

/// Same as [`binding_relevant`] for an untyped object, failing if it does not decode
pub fn binding_object_relevant(object: &DynamicObject, namespace: &str) -> Result<bool> {
    let binding = binding_from_object(object)?;
    Ok(binding_relevant(&binding, namespace))
}

/// Check if any of the bindings grants the ClusterRole to a subject in the namespace
pub fn cluster_role_granted(
    bindings: &[ClusterRoleBinding],
    cluster_role_name: &str,
    namespace: &str,
) -> bool {
    bindings
        .iter()
        .filter(|binding| binding.role_ref.name == cluster_role_name)
        .any(|binding| binding_relevant(binding, namespace))
}

/// Check if a ClusterRole is granted to any subject in the namespace.
///
/// ClusterRoles carry no subjects, so this lists every binding on the cluster.
/// Use [`cluster_role_granted`] on a single listing when checking many roles.
#[instrument(skip(api))]
pub async fn cluster_role_relevant<A: ClusterRoleBindingApi>(
    api: &A,
    cluster_role_name: &str,
    namespace: &str,
) -> Result<bool> {
    let bindings = api.list().await?;

    let relevant = cluster_role_granted(&bindings, cluster_role_name, namespace);

    debug!(
        "Cluster role {} relevant to namespace {}: {}",
        cluster_role_name, namespace, relevant
    );
    Ok(relevant)
}
