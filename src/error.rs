// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to decode object: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Invalid service account username: {0}")]
    InvalidUsername(String),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Cluster role creation failed: {0}")]
    ClusterRoleError(String),
}

pub type Result<T> = std::result::Result<T, MigrateError>;
