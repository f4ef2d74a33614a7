// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Subject kinds, namespace classification and canonical subject identity.

use crate::constants::kinds;
use crate::rbac::identity::{group_namespace, split_username};
use k8s_openapi::api::rbac::v1::Subject;
use std::fmt;

/// The subject kinds that can carry a namespace identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    ServiceAccount,
    User,
    Group,
}

impl SubjectKind {
    /// Parse the `kind` field of a subject, `None` for kinds that are not modelled
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            kinds::SERVICE_ACCOUNT => Some(Self::ServiceAccount),
            kinds::USER => Some(Self::User),
            kinds::GROUP => Some(Self::Group),
            _ => None,
        }
    }

    pub fn of(subject: &Subject) -> Option<Self> {
        Self::from_kind(&subject.kind)
    }
}

/// Check whether a subject refers to an identity in the given namespace.
///
/// Never fails: user names that do not follow the service account convention
/// and unknown kinds simply do not match.
pub fn belongs_to_namespace(subject: &Subject, namespace: &str) -> bool {
    match SubjectKind::of(subject) {
        Some(SubjectKind::ServiceAccount) => {
            subject.namespace.as_deref().unwrap_or_default() == namespace
        }
        Some(SubjectKind::User) => {
            split_username(&subject.name)
                .is_ok_and(|(user_namespace, _)| user_namespace == namespace)
        }
        Some(SubjectKind::Group) => group_namespace(&subject.name) == namespace,
        None => false,
    }
}

/// Canonical identity of a subject, used to de-duplicate subject lists.
///
/// Two subjects with the same kind, name and namespace are the same principal,
/// whatever their other fields say.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectKey {
    kind: String,
    name: String,
    namespace: String,
}

impl From<&Subject> for SubjectKey {
    fn from(subject: &Subject) -> Self {
        Self {
            kind: subject.kind.clone(),
            name: subject.name.clone(),
            namespace: subject.namespace.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}/{}", self.kind, self.name)
        } else {
            write!(f, "{}/{}/{}", self.kind, self.namespace, self.name)
        }
    }
}
