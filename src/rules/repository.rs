use super::builtin::builtin_rules;
use super::types::{LoadedRules, RulesOrigin, RulesTable};
use crate::error::Result;
use crate::services::fetch::{build_client, fetch_rules};
use crate::services::store::RulesCache;
use reqwest::Client;

/// Client timeout when no remote tier is configured.
const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Layered rules source: remote, then persisted cache, then built-in.
pub struct RulesRepository<'a, C: RulesCache> {
    cache: &'a C,
    remote_url: Option<String>,
    client: Client,
}

impl<'a, C: RulesCache> RulesRepository<'a, C> {
    pub fn new(cache: &'a C, remote_url: Option<String>, timeout_ms: u64) -> Result<Self> {
        Ok(Self {
            cache,
            remote_url: remote_url.filter(|u| !u.trim().is_empty()),
            client: build_client(timeout_ms)?,
        })
    }

    /// Cache-only repository; the remote tier is skipped.
    pub fn offline(cache: &'a C) -> Result<Self> {
        Self::new(cache, None, DEFAULT_TIMEOUT_MS)
    }

    fn cached(&self) -> Option<RulesTable> {
        match self.cache.get() {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable rules cache");
                None
            }
        }
    }

    /// Resolve the rules table for this run.
    ///
    /// A remote table replaces the cache. Fetch and parse failures fall back
    /// to the cached copy, then to the built-in table; nothing is returned as
    /// an error.
    pub async fn ensure_rules_loaded(&self) -> LoadedRules {
        let cached = self.cached();

        if let Some(url) = &self.remote_url {
            match fetch_rules(&self.client, url).await {
                Ok(table) => {
                    if let Err(e) = self.cache.set(&table) {
                        tracing::warn!(error = %e, "could not persist rules cache");
                    }
                    tracing::debug!(version = %table.version, rules = table.rules.len(), "remote rules loaded");
                    return LoadedRules {
                        origin: RulesOrigin::Remote,
                        table,
                    };
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "rules fetch failed, falling back");
                }
            }
        }

        match cached {
            Some(table) => LoadedRules {
                origin: RulesOrigin::Cache,
                table,
            },
            None => LoadedRules {
                origin: RulesOrigin::Builtin,
                table: builtin_rules(),
            },
        }
    }
}
