// ── MCP Connect SDK: Endpoint Resolver ──────────────────────────────────────
// Derives the single base URL for a package: the first active deployment
// wins, else the package-level source API URL. Resolution runs fresh on
// every connect — a redeploy is picked up on the next connect without
// restarting the caller.

use log::{debug, warn};

use crate::error::{SdkError, SdkResult};
use crate::registry::PackageRegistry;
use crate::types::{DeploymentStatus, PackageRecord};

/// Derive the base URL from a package record.
///
/// Scan order: first deployment with `status == active` (list order; if the
/// registry ever marks several active, the first one wins), then the
/// record's `source_api_url`, then its top-level `deployment_url`. Returns
/// `None` when none exist.
pub fn resolve_endpoint(record: &PackageRecord) -> Option<String> {
    if let Some(active) = record
        .deployments
        .iter()
        .find(|d| d.status == DeploymentStatus::Active)
    {
        debug!(
            "[resolver] '{}' → active deployment {}",
            record.name, active.deployment_url
        );
        return Some(active.deployment_url.clone());
    }

    if let Some(ref url) = record.source_api_url {
        debug!("[resolver] '{}' → source_api_url {}", record.name, url);
        return Some(url.clone());
    }

    if let Some(ref url) = record.deployment_url {
        debug!("[resolver] '{}' → top-level deployment_url {}", record.name, url);
        return Some(url.clone());
    }

    None
}

/// Fetch the package record and resolve its endpoint.
/// Fails with `EndpointResolution` when no usable URL exists.
pub async fn resolve(registry: &dyn PackageRegistry, package: &str) -> SdkResult<String> {
    let record = registry.get_package(package).await?;

    resolve_endpoint(&record).ok_or_else(|| {
        warn!("[resolver] No deployment URL found for package '{}'", package);
        SdkError::EndpointResolution {
            package: package.to_string(),
        }
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
