// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Rewriting subject identities from source namespaces to destination namespaces

use crate::error::Result;
use crate::rbac::identity::{make_namespace_group_name, make_username, split_username};
use crate::rbac::object::{binding_from_object, binding_to_object};
use crate::rbac::subject::{belongs_to_namespace, SubjectKind};
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, Subject};
use kube::api::DynamicObject;
use std::collections::BTreeMap;

/// Rewrite a subject of the source namespace so it refers to the destination namespace
pub fn remap_subject(subject: &Subject, destination: &str) -> Result<Subject> {
    let mut remapped = subject.clone();
    match SubjectKind::of(subject) {
        Some(SubjectKind::ServiceAccount) => {
            remapped.namespace = Some(destination.to_string());
        }
        Some(SubjectKind::User) => {
            let (_, account) = split_username(&subject.name)?;
            remapped.name = make_username(destination, account);
        }
        Some(SubjectKind::Group) => {
            remapped.name = make_namespace_group_name(destination);
        }
        None => {}
    }
    Ok(remapped)
}

/// The subjects to apply on the destination cluster.
///
/// Mapping entries are visited in key order and, for each, the binding's subjects
/// in order. Subjects of namespaces that are not in the mapping are dropped.
pub fn remap_subjects(
    binding: &ClusterRoleBinding,
    mapping: &BTreeMap<String, String>,
) -> Result<Vec<Subject>> {
    let mut subjects = Vec::new();
    for (source, destination) in mapping {
        for subject in binding.subjects.iter().flatten() {
            if !belongs_to_namespace(subject, source) {
                continue;
            }
            subjects.push(remap_subject(subject, destination)?);
        }
    }
    Ok(subjects)
}

/// A copy of the binding holding the remapped subjects
pub fn binding_for_apply(
    binding: &ClusterRoleBinding,
    mapping: &BTreeMap<String, String>,
) -> Result<ClusterRoleBinding> {
    Ok(ClusterRoleBinding {
        subjects: Some(remap_subjects(binding, mapping)?),
        ..binding.clone()
    })
}

/// Rewrite an untyped ClusterRoleBinding in place so it holds the remapped subjects
pub fn prepare_for_apply(
    object: &mut DynamicObject,
    mapping: &BTreeMap<String, String>,
) -> Result<()> {
    let binding = binding_from_object(object)?;
    *object = binding_to_object(&binding_for_apply(&binding, mapping)?)?;
    Ok(())
}
