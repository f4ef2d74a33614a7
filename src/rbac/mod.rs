// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace scoping, extraction, remapping and merging of cluster-scoped RBAC bindings.

pub mod extract;
pub mod identity;
pub mod merge;
pub mod object;
pub mod remap;
pub mod scope;
pub mod subject;

pub use extract::{binding_for_collection, extract_subjects, prepare_for_collection};
pub use merge::{merge_and_apply, merge_subjects};
pub use object::{binding_from_object, binding_to_object};
pub use remap::{binding_for_apply, prepare_for_apply, remap_subject, remap_subjects};
pub use scope::{
    binding_object_relevant, binding_relevant, cluster_role_granted, cluster_role_relevant,
};
pub use subject::{belongs_to_namespace, SubjectKey, SubjectKind};
