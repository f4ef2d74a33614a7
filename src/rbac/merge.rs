// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Merging a migrated ClusterRoleBinding into the one on the destination cluster

use crate::error::Result;
use crate::kubernetes::ClusterRoleBindingApi;
use crate::rbac::subject::SubjectKey;
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, Subject};
use kube::ResourceExt;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Union of two subject lists, de-duplicated by [`SubjectKey`].
///
/// Current subjects keep their position. An incoming subject with the same key
/// replaces the current one in place, other incoming subjects are appended.
pub fn merge_subjects(current: &[Subject], incoming: &[Subject]) -> Vec<Subject> {
    let mut merged: Vec<Subject> = Vec::with_capacity(current.len() + incoming.len());
    let mut positions: HashMap<SubjectKey, usize> = HashMap::new();

    for subject in current.iter().chain(incoming) {
        let key = SubjectKey::from(subject);
        match positions.get(&key) {
            Some(&index) => merged[index] = subject.clone(),
            None => {
                positions.insert(key, merged.len());
                merged.push(subject.clone());
            }
        }
    }

    merged
}

/// Create the binding on the destination, or merge its subjects into the existing one.
///
/// Subjects already on the destination are only replaced by incoming subjects
/// with the same identity. Concurrent merges of the same binding are not guarded
/// against: the last update wins.
#[instrument(skip(api, binding), fields(binding = %binding.name_any()))]
pub async fn merge_and_apply<A: ClusterRoleBindingApi>(
    api: &A,
    binding: &ClusterRoleBinding,
) -> Result<ClusterRoleBinding> {
    let name = binding.name_any();

    let Some(mut current) = api.get(&name).await? else {
        info!("Creating cluster role binding {}", name);
        return api.create(binding).await;
    };

    let current_subjects = current.subjects.take().unwrap_or_default();
    let incoming_subjects = binding.subjects.as_deref().unwrap_or_default();
    let merged = merge_subjects(&current_subjects, incoming_subjects);

    debug!(
        "Merging {} incoming subjects into {} existing subjects, {} after merge",
        incoming_subjects.len(),
        current_subjects.len(),
        merged.len()
    );

    current.subjects = Some(merged);
    let updated = api.update(&current).await?;
    info!("Updated cluster role binding {}", name);
    Ok(updated)
}
