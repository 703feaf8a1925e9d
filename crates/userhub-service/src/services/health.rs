//! Health service
//!
//! Liveness and readiness checks.

use tracing::warn;

use crate::dto::{HealthResponse, ReadinessResponse};

use super::context::ServiceContext;

pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn liveness(&self) -> HealthResponse {
        HealthResponse::healthy()
    }

    /// Probe the backing store
    pub async fn readiness(&self) -> ReadinessResponse {
        let database_healthy = match self.ctx.store_health().ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Store health check failed");
                false
            }
        };
        ReadinessResponse::ready(database_healthy)
    }
}
