// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Conversion between untyped objects and typed ClusterRoleBindings

use crate::error::Result;
use k8s_openapi::api::rbac::v1::ClusterRoleBinding;
use kube::api::DynamicObject;

/// Decode an untyped object into a ClusterRoleBinding
pub fn binding_from_object(object: &DynamicObject) -> Result<ClusterRoleBinding> {
    Ok(serde_json::from_value(serde_json::to_value(object)?)?)
}

/// Encode a ClusterRoleBinding as an untyped object
pub fn binding_to_object(binding: &ClusterRoleBinding) -> Result<DynamicObject> {
    Ok(serde_json::from_value(serde_json::to_value(binding)?)?)
}
