// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Encoding and decoding of service account identities carried in User and Group names.

use crate::constants::identity::{
    SERVICE_ACCOUNT_GROUP_PREFIX, SERVICE_ACCOUNT_USERNAME_PREFIX, USERNAME_SEPARATOR,
};
use crate::error::{MigrateError, Result};

const DNS1123_LABEL_MAX_LENGTH: usize = 63;
const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

/// Build the user name of a service account, e.g. `system:serviceaccount:ns:account`
pub fn make_username(namespace: &str, account: &str) -> String {
    format!("{SERVICE_ACCOUNT_USERNAME_PREFIX}{namespace}{USERNAME_SEPARATOR}{account}")
}

/// Split a service account user name into its `(namespace, account)` parts.
///
/// Fails if the prefix is missing, if the remainder does not consist of exactly
/// two parts, or if either part is not a valid Kubernetes object name.
pub fn split_username(username: &str) -> Result<(&str, &str)> {
    let Some(rest) = username.strip_prefix(SERVICE_ACCOUNT_USERNAME_PREFIX) else {
        return Err(MigrateError::InvalidUsername(format!(
            "'{}' does not start with '{}'",
            username, SERVICE_ACCOUNT_USERNAME_PREFIX
        )));
    };

    let mut parts = rest.split(USERNAME_SEPARATOR);
    let (Some(namespace), Some(account), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MigrateError::InvalidUsername(format!(
            "'{}' is not of the form '{}<namespace>:<name>'",
            username, SERVICE_ACCOUNT_USERNAME_PREFIX
        )));
    };

    if !is_dns1123_label(namespace) {
        return Err(MigrateError::InvalidUsername(format!(
            "'{}' has an invalid namespace '{}'",
            username, namespace
        )));
    }
    if !is_dns1123_subdomain(account) {
        return Err(MigrateError::InvalidUsername(format!(
            "'{}' has an invalid account name '{}'",
            username, account
        )));
    }

    Ok((namespace, account))
}

/// Build the group name shared by all service accounts of a namespace
pub fn make_namespace_group_name(namespace: &str) -> String {
    format!("{SERVICE_ACCOUNT_GROUP_PREFIX}{namespace}")
}

/// The namespace encoded in a service account group name.
///
/// Names without the group prefix come back unchanged and will not match a real namespace.
pub fn group_namespace(group: &str) -> &str {
    group
        .strip_prefix(SERVICE_ACCOUNT_GROUP_PREFIX)
        .unwrap_or(group)
}

fn is_dns1123_label(value: &str) -> bool {
    let bytes = value.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            value.len() <= DNS1123_LABEL_MAX_LENGTH
                && is_alphanumeric(*first)
                && is_alphanumeric(*last)
                && bytes.iter().all(|b| is_alphanumeric(*b) || *b == b'-')
        }
        _ => false,
    }
}

fn is_dns1123_subdomain(value: &str) -> bool {
    value.len() <= DNS1123_SUBDOMAIN_MAX_LENGTH && value.split('.').all(is_dns1123_label)
}

fn is_alphanumeric(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}
