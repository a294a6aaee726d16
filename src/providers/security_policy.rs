// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed per-domain security policies.
//!
//! Policies live at `{base_path}/{domain}/security-policy.json`. A domain
//! without its own file uses `{base_path}/default/security-policy.json`, and
//! without that the built-in [`SecurityPolicy::default_for`] policy. Whatever
//! is resolved is cached until invalidated.

use crate::domain::settings::SecurityPolicy;
use crate::domain::{ConfigError, Result, SecurityPolicyProvider};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// File name of a domain's policy document.
pub const POLICY_FILE_NAME: &str = "security-policy.json";

/// Directory holding the shared fallback policy.
pub const DEFAULT_POLICY_DIR: &str = "default";

/// Domain reported for policies requested without a domain.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Security policy store over a directory tree.
///
/// # Examples
///
/// ```rust
/// use domaincfg::domain::SecurityPolicyProvider;
/// use domaincfg::providers::SecurityPolicyStore;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = SecurityPolicyStore::new(dir.path());
///
/// let mut policy = store.policy("acme");
/// assert_eq!(policy.domain, "acme");
///
/// policy.login_security.max_failed_attempts = 3;
/// assert!(store.update_policy("acme", &policy));
/// assert_eq!(store.policy("acme").login_security.max_failed_attempts, 3);
/// assert_eq!(store.configured_domains(), vec!["acme"]);
/// ```
#[derive(Debug)]
pub struct SecurityPolicyStore {
    base_path: PathBuf,
    cache: RwLock<HashMap<String, SecurityPolicy>>,
    // Bumped under the cache write lock by every invalidation
    generation: AtomicU64,
}

impl SecurityPolicyStore {
    /// Creates a store rooted at `base_path`. The directory need not exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            cache: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// The directory policies are stored under.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the policy file for `domain`.
    pub fn policy_path(&self, domain: &str) -> PathBuf {
        self.base_path.join(domain).join(POLICY_FILE_NAME)
    }

    /// Returns `true` if the domain can be used as a single directory name.
    fn is_valid_domain(domain: &str) -> bool {
        !domain.is_empty()
            && domain != "."
            && domain != ".."
            && !domain.contains(['/', '\\'])
    }

    fn cached(&self, domain: &str) -> Option<SecurityPolicy> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(domain)
            .cloned()
    }

    fn resolve(&self, domain: &str) -> SecurityPolicy {
        let domain_path = self.policy_path(domain);
        if domain_path.is_file() {
            return self.load_or_default(&domain_path, domain);
        }

        let default_path = self.policy_path(DEFAULT_POLICY_DIR);
        if default_path.is_file() {
            tracing::warn!(domain, "Using default security policy for domain");
            return self.load_or_default(&default_path, domain);
        }

        tracing::warn!(domain, "No security policy file found, using built-in defaults");
        SecurityPolicy::default_for(domain)
    }

    fn load_or_default(&self, path: &Path, domain: &str) -> SecurityPolicy {
        match Self::load(path, domain) {
            Ok(policy) => {
                tracing::info!(domain, path = %path.display(), "Loaded security policy");
                policy
            }
            Err(e) => {
                tracing::error!(
                    domain,
                    path = %path.display(),
                    error = %e,
                    "Error loading security policy, using defaults"
                );
                SecurityPolicy::default_for(domain)
            }
        }
    }

    fn load(path: &Path, domain: &str) -> Result<SecurityPolicy> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::policy_store(domain, "failed to read policy file", e))?;
        let mut policy = SecurityPolicy::from_json_str(&json)?;
        policy.domain = domain.to_string();
        Ok(policy)
    }

    fn write(&self, domain: &str, policy: &SecurityPolicy) -> Result<PathBuf> {
        let path = self.policy_path(domain);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                ConfigError::policy_store(domain, "failed to create policy directory", e)
            })?;
        }

        let json = policy.to_json_pretty()?;
        // Readers never see a partially written file
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)
            .map_err(|e| ConfigError::policy_store(domain, "failed to write policy file", e))?;
        fs::rename(&staging, &path)
            .map_err(|e| ConfigError::policy_store(domain, "failed to replace policy file", e))?;
        Ok(path)
    }
}

impl SecurityPolicyProvider for SecurityPolicyStore {
    fn policy(&self, domain: &str) -> SecurityPolicy {
        if domain.is_empty() {
            tracing::warn!("Attempted to get security policy with an empty domain");
            return SecurityPolicy::default_for(UNKNOWN_DOMAIN);
        }

        if !Self::is_valid_domain(domain) {
            tracing::warn!(domain, "Security policy requested for a malformed domain");
            return SecurityPolicy::default_for(domain);
        }

        if let Some(cached) = self.cached(domain) {
            return cached;
        }

        let generation = self.generation.load(Ordering::Acquire);
        let policy = self.resolve(domain);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // An invalidation during resolve may have made this read stale
        if self.generation.load(Ordering::Acquire) == generation {
            cache.insert(domain.to_string(), policy.clone());
        }
        policy
    }

    fn update_policy(&self, domain: &str, policy: &SecurityPolicy) -> bool {
        if !Self::is_valid_domain(domain) {
            tracing::error!(domain, "Cannot update security policy for an empty or malformed domain");
            return false;
        }

        match self.write(domain, policy) {
            Ok(path) => {
                self.invalidate_cache(domain);
                tracing::info!(domain, path = %path.display(), "Updated security policy");
                true
            }
            Err(e) => {
                tracing::error!(domain, error = %e, "Failed to update security policy");
                false
            }
        }
    }

    fn invalidate_cache(&self, domain: &str) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.remove(domain);
        self.generation.fetch_add(1, Ordering::AcqRel);
        drop(cache);
        tracing::debug!(domain, "Invalidated security policy cache");
    }

    fn invalidate_all_caches(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.clear();
        self.generation.fetch_add(1, Ordering::AcqRel);
        drop(cache);
        tracing::info!("Invalidated all security policy caches");
    }

    fn configured_domains(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.base_path) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut domains: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().join(POLICY_FILE_NAME).is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        domains.sort();
        domains
    }
}
