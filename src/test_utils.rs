// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses and cluster state.

use crate::constants::kinds;
use crate::error::{MigrateError, Result};
use crate::kubernetes::ClusterRoleBindingApi;
use http::{Request, Response};
use http_body_util::BodyExt;
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, RoleRef, Subject};
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::{Client, ResourceExt};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

const RBAC_GROUP: &str = "rbac.authorization.k8s.io";

/// A request received by the [`MockService`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
        self
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        // Try exact match first
        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        // Try prefix match for paths like /api/v1/namespaces/foo
        for ((m, p), resp) in responses.iter() {
            if m == method && path.starts_with(p) {
                return Some(resp.clone());
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<
            dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>>
                + Send,
        >,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.find_response(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let body = req.into_body().collect().await?.to_bytes();
            requests.lock().unwrap().push(RecordedRequest {
                method,
                path,
                body: String::from_utf8_lossy(&body).into_owned(),
            });

            match response {
                Some((status, body)) => Ok(Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap()),
                None => {
                    // Default 404 for unmatched requests
                    let body = r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"not found","reason":"NotFound","code":404}"#;
                    Ok(Response::builder()
                        .status(404)
                        .header("content-type", "application/json")
                        .body(Body::from(body.as_bytes().to_vec()))
                        .unwrap())
                }
            }
        })
    }
}

/// Create a mock ClusterRoleBinding JSON object without subjects
pub fn cluster_role_binding_json(name: &str, role: &str) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "rbac.authorization.k8s.io/v1",
        "kind": "ClusterRoleBinding",
        "metadata": {
            "name": name,
            "uid": format!("{}-uid", name),
            "resourceVersion": "1"
        },
        "roleRef": {
            "apiGroup": "rbac.authorization.k8s.io",
            "kind": "ClusterRole",
            "name": role
        }
    })
}

/// Create a mock ClusterRoleBindingList JSON response
pub fn cluster_role_binding_list_json(items: &[serde_json::Value]) -> String {
    serde_json::json!({
        "apiVersion": "rbac.authorization.k8s.io/v1",
        "kind": "ClusterRoleBindingList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Create a mock ClusterRole JSON response
pub fn cluster_role_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "rbac.authorization.k8s.io/v1",
        "kind": "ClusterRole",
        "metadata": {
            "name": name,
            "uid": format!("{}-uid", name),
            "resourceVersion": "1"
        },
        "rules": [{
            "apiGroups": [""],
            "resources": ["pods"],
            "verbs": ["get", "list"]
        }]
    })
    .to_string()
}

/// A call made against [`FakeBindings`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(String),
    Create(String),
    Update(String),
}

/// In-memory cluster holding ClusterRoleBindings keyed by name
#[derive(Default)]
pub struct FakeBindings {
    bindings: Mutex<BTreeMap<String, ClusterRoleBinding>>,
    calls: Mutex<Vec<Call>>,
    fail_list: bool,
    fail_get: bool,
    fail_writes_for: Option<String>,
}

impl FakeBindings {
    pub fn new(bindings: Vec<ClusterRoleBinding>) -> Self {
        Self {
            bindings: Mutex::new(
                bindings
                    .into_iter()
                    .map(|b| (b.name_any(), b))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    /// A cluster whose list call always fails
    pub fn failing_list() -> Self {
        Self {
            fail_list: true,
            ..Default::default()
        }
    }

    /// Make every get call fail with a server error
    pub fn failing_get(mut self) -> Self {
        self.fail_get = true;
        self
    }

    /// Make create and update of the named binding fail
    pub fn failing_writes_for(mut self, name: &str) -> Self {
        self.fail_writes_for = Some(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn binding(&self, name: &str) -> Option<ClusterRoleBinding> {
        self.bindings.lock().unwrap().get(name).cloned()
    }
}

fn server_error() -> MigrateError {
    MigrateError::KubeError(kube::Error::Api(kube::error::ErrorResponse {
        status: "Failure".to_string(),
        message: "internal error".to_string(),
        reason: "InternalError".to_string(),
        code: 500,
    }))
}

impl ClusterRoleBindingApi for FakeBindings {
    async fn list(&self) -> Result<Vec<ClusterRoleBinding>> {
        self.calls.lock().unwrap().push(Call::List);
        if self.fail_list {
            return Err(server_error());
        }
        Ok(self.bindings.lock().unwrap().values().cloned().collect())
    }

    async fn get(&self, name: &str) -> Result<Option<ClusterRoleBinding>> {
        self.calls.lock().unwrap().push(Call::Get(name.to_string()));
        if self.fail_get {
            return Err(server_error());
        }
        Ok(self.bindings.lock().unwrap().get(name).cloned())
    }

    async fn create(&self, binding: &ClusterRoleBinding) -> Result<ClusterRoleBinding> {
        let name = binding.name_any();
        self.calls.lock().unwrap().push(Call::Create(name.clone()));
        if self.fail_writes_for.as_ref() == Some(&name) {
            return Err(server_error());
        }
        self.bindings.lock().unwrap().insert(name, binding.clone());
        Ok(binding.clone())
    }

    async fn update(&self, binding: &ClusterRoleBinding) -> Result<ClusterRoleBinding> {
        let name = binding.name_any();
        self.calls.lock().unwrap().push(Call::Update(name.clone()));
        if self.fail_writes_for.as_ref() == Some(&name) {
            return Err(server_error());
        }
        self.bindings.lock().unwrap().insert(name, binding.clone());
        Ok(binding.clone())
    }
}

pub fn service_account(name: &str, namespace: &str) -> Subject {
    Subject {
        kind: kinds::SERVICE_ACCOUNT.to_string(),
        name: name.to_string(),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    }
}

pub fn user(name: &str) -> Subject {
    Subject {
        kind: kinds::USER.to_string(),
        api_group: Some(RBAC_GROUP.to_string()),
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn group(name: &str) -> Subject {
    Subject {
        kind: kinds::GROUP.to_string(),
        api_group: Some(RBAC_GROUP.to_string()),
        name: name.to_string(),
        ..Default::default()
    }
}

/// Build a ClusterRoleBinding granting `role` to `subjects`
pub fn binding(name: &str, role: &str, subjects: Vec<Subject>) -> ClusterRoleBinding {
    ClusterRoleBinding {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        role_ref: RoleRef {
            api_group: RBAC_GROUP.to_string(),
            kind: "ClusterRole".to_string(),
            name: role.to_string(),
        },
        subjects: Some(subjects),
    }
}
