// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Conventions Kubernetes uses to encode service account identities in names
pub mod identity {
    /// Prefix of a service account's user name: `system:serviceaccount:<namespace>:<name>`
    pub const SERVICE_ACCOUNT_USERNAME_PREFIX: &str = "system:serviceaccount:";
    /// Prefix of a namespace's service account group: `system:serviceaccounts:<namespace>`
    pub const SERVICE_ACCOUNT_GROUP_PREFIX: &str = "system:serviceaccounts:";
    /// Separator between the namespace and the account in a user name
    pub const USERNAME_SEPARATOR: char = ':';
}

/// RBAC subject kinds
pub mod kinds {
    pub const SERVICE_ACCOUNT: &str = "ServiceAccount";
    pub const USER: &str = "User";
    pub const GROUP: &str = "Group";
}

/// The field manager name used when writing to the destination cluster
pub const FIELD_MANAGER: &str = "crb-migrate";
