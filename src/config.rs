// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::path::PathBuf;

/// Migration configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Source namespace to destination namespace
    pub namespace_mapping: BTreeMap<String, String>,
    /// Kubeconfig of the source cluster, inferred when unset
    pub source_kubeconfig: Option<PathBuf>,
    /// Kubeconfig of the destination cluster, inferred when unset
    pub destination_kubeconfig: Option<PathBuf>,
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mapping = env::var("NAMESPACE_MAPPING")
            .context("NAMESPACE_MAPPING environment variable not set")?;
        let namespace_mapping = parse_namespace_mapping(&mapping)
            .context("NAMESPACE_MAPPING is invalid")?;
        let dry_run = parse_flag(env::var("DRY_RUN").ok().as_deref())
            .context("DRY_RUN must be true or false")?;

        Ok(Config {
            namespace_mapping,
            source_kubeconfig: env::var_os("SOURCE_KUBECONFIG").map(PathBuf::from),
            destination_kubeconfig: env::var_os("DESTINATION_KUBECONFIG").map(PathBuf::from),
            dry_run,
        })
    }

    /// The namespaces to collect from the source cluster
    pub fn source_namespaces(&self) -> BTreeSet<String> {
        self.namespace_mapping.keys().cloned().collect()
    }
}

/// Parse a boolean flag, unset meaning `false`. Unrecognised values are an error.
pub fn parse_flag(value: Option<&str>) -> Result<bool> {
    let Some(value) = value.map(str::trim) else {
        return Ok(false);
    };
    match value.to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" => Ok(false),
        "true" | "1" | "yes" => Ok(true),
        _ => bail!("unrecognised value '{}'", value),
    }
}

/// Parse `source=destination` pairs separated by commas. A bare namespace maps to itself.
pub fn parse_namespace_mapping(value: &str) -> Result<BTreeMap<String, String>> {
    let mut mapping = BTreeMap::new();

    for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (source, destination) = match entry.split_once('=') {
            Some((source, destination)) => (source.trim(), destination.trim()),
            None => (entry, entry),
        };
        if source.is_empty() || destination.is_empty() {
            bail!("mapping entry '{}' has an empty namespace", entry);
        }
        if mapping
            .insert(source.to_string(), destination.to_string())
            .is_some()
        {
            bail!("namespace '{}' is mapped more than once", source);
        }
    }

    if mapping.is_empty() {
        bail!("no namespaces to migrate");
    }

    Ok(mapping)
}
