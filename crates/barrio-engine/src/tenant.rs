//! Explicit tenant resolution.
//!
//! Every entry point receives the tenant it operates on. There is no implicit
//! default community: a request that cannot name a tenant is rejected.

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::error::{BarrioError, Result};

/// Identifier of an organizational partition (a community or neighborhood).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(NonZeroU64);

impl TenantId {
    /// Returns `None` for zero, which is never a valid tenant.
    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Records that belong to exactly one tenant.
pub trait TenantScoped {
    fn tenant(&self) -> TenantId;
}

/// Resolve the tenant a request operates on.
///
/// - An authenticated user's own tenant always wins.
/// - A user may not address a different tenant than their own.
/// - Anonymous requests must name the tenant explicitly.
pub fn resolve_tenant(user_tenant: Option<TenantId>, requested: Option<TenantId>) -> Result<TenantId> {
    match (user_tenant, requested) {
        (Some(actual), Some(requested)) if actual != requested => Err(BarrioError::TenantMismatch {
            requested: requested.get(),
            actual: actual.get(),
        }),
        (Some(actual), _) => Ok(actual),
        (None, Some(requested)) => Ok(requested),
        (None, None) => Err(BarrioError::TenantRequired),
    }
}

/// Keep only the records that belong to `tenant`.
pub fn in_tenant<T: TenantScoped>(records: &[T], tenant: TenantId) -> impl Iterator<Item = &T> {
    records.iter().filter(move |r| r.tenant() == tenant)
}
