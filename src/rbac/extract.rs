// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Narrowing a ClusterRoleBinding down to the subjects of the collected namespaces

use crate::error::Result;
use crate::rbac::object::{binding_from_object, binding_to_object};
use crate::rbac::subject::belongs_to_namespace;
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, Subject};
use kube::api::DynamicObject;
use std::collections::BTreeSet;

/// Subjects of the binding that belong to any of the namespaces, unmodified and in binding order.
///
/// A subject is added once for every namespace it matches. Every modelled kind
/// belongs to a single namespace, so with a set of namespaces each subject
/// appears at most once.
pub fn extract_subjects(
    binding: &ClusterRoleBinding,
    namespaces: &BTreeSet<String>,
) -> Vec<Subject> {
    let mut subjects = Vec::new();
    for subject in binding.subjects.iter().flatten() {
        for namespace in namespaces {
            if belongs_to_namespace(subject, namespace) {
                subjects.push(subject.clone());
            }
        }
    }
    subjects
}

/// A copy of the binding holding only the subjects of the namespaces
pub fn binding_for_collection(
    binding: &ClusterRoleBinding,
    namespaces: &BTreeSet<String>,
) -> ClusterRoleBinding {
    ClusterRoleBinding {
        subjects: Some(extract_subjects(binding, namespaces)),
        ..binding.clone()
    }
}

/// Rewrite an untyped ClusterRoleBinding in place so it only holds the subjects of the namespaces
pub fn prepare_for_collection(
    object: &mut DynamicObject,
    namespaces: &BTreeSet<String>,
) -> Result<()> {
    let binding = binding_from_object(object)?;
    *object = binding_to_object(&binding_for_collection(&binding, namespaces))?;
    Ok(())
}
