// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Access to ClusterRoleBindings on a cluster

use crate::constants::FIELD_MANAGER;
use crate::error::Result;
use k8s_openapi::api::rbac::v1::ClusterRoleBinding;
use kube::{
    api::{ListParams, PostParams},
    Api, ResourceExt,
};
use tracing::{debug, instrument};

/// The cluster operations needed to scope and merge ClusterRoleBindings.
///
/// None of the operations retry.
#[allow(async_fn_in_trait)]
pub trait ClusterRoleBindingApi {
    /// List all ClusterRoleBindings on the cluster
    async fn list(&self) -> Result<Vec<ClusterRoleBinding>>;

    /// Get a ClusterRoleBinding by name, `None` if it does not exist
    async fn get(&self, name: &str) -> Result<Option<ClusterRoleBinding>>;

    async fn create(&self, binding: &ClusterRoleBinding) -> Result<ClusterRoleBinding>;

    async fn update(&self, binding: &ClusterRoleBinding) -> Result<ClusterRoleBinding>;
}

fn post_params() -> PostParams {
    PostParams {
        field_manager: Some(FIELD_MANAGER.to_string()),
        ..Default::default()
    }
}

impl ClusterRoleBindingApi for Api<ClusterRoleBinding> {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<ClusterRoleBinding>> {
        let bindings = Api::list(self, &ListParams::default()).await?;
        debug!("Listed {} cluster role bindings", bindings.items.len());
        Ok(bindings.items)
    }

    #[instrument(skip(self))]
    async fn get(&self, name: &str) -> Result<Option<ClusterRoleBinding>> {
        Ok(self.get_opt(name).await?)
    }

    #[instrument(skip(self, binding), fields(binding = %binding.name_any()))]
    async fn create(&self, binding: &ClusterRoleBinding) -> Result<ClusterRoleBinding> {
        Ok(Api::create(self, &post_params(), binding).await?)
    }

    #[instrument(skip(self, binding), fields(binding = %binding.name_any()))]
    async fn update(&self, binding: &ClusterRoleBinding) -> Result<ClusterRoleBinding> {
        Ok(self
            .replace(&binding.name_any(), &post_params(), binding)
            .await?)
    }
}
