// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, ClusterRoleBinding access and ClusterRole copying.

pub mod bindings;
pub mod client;
pub mod cluster_roles;

pub use bindings::ClusterRoleBindingApi;
pub use client::create_client;
pub use cluster_roles::ensure_cluster_role_exists;
