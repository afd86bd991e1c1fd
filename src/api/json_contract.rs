use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

use super::{ControlDescriptor, Dashboard, DispatchOutcome, control_catalog};

pub const DISPATCH_OUTCOME_JSON_SCHEMA_V1: u32 = 1;
pub const CONTROL_CATALOG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutcomeJsonContractV1 {
    pub schema_version: u32,
    pub outcome: DispatchOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlCatalogJsonContractV1 {
    pub schema_version: u32,
    pub controls: Vec<ControlDescriptor>,
}

impl DispatchOutcome {
    pub fn to_json_contract_v1_pretty(&self) -> DashboardResult<String> {
        let payload = DispatchOutcomeJsonContractV1 {
            schema_version: DISPATCH_OUTCOME_JSON_SCHEMA_V1,
            outcome: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DashboardError::InvalidData(format!("failed to serialize outcome contract v1: {e}"))
        })
    }

    /// Accepts either a bare outcome or a versioned v1 payload.
    pub fn from_json_compat_str(input: &str) -> DashboardResult<Self> {
        if let Ok(payload) = serde_json::from_str::<DispatchOutcomeJsonContractV1>(input) {
            if payload.schema_version != DISPATCH_OUTCOME_JSON_SCHEMA_V1 {
                return Err(DashboardError::InvalidData(format!(
                    "unsupported outcome schema version: {}",
                    payload.schema_version
                )));
            }
            return Ok(payload.outcome);
        }
        serde_json::from_str::<DispatchOutcome>(input).map_err(|e| {
            DashboardError::InvalidData(format!("failed to parse outcome json payload: {e}"))
        })
    }
}

impl Dashboard<'_> {
    pub fn render_all_json_contract_v1_pretty(&self) -> DashboardResult<String> {
        self.render_all()?.to_json_contract_v1_pretty()
    }

    pub fn control_catalog_json_contract_v1_pretty(&self) -> DashboardResult<String> {
        let payload = ControlCatalogJsonContractV1 {
            schema_version: CONTROL_CATALOG_JSON_SCHEMA_V1,
            controls: control_catalog(self.dataset()),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DashboardError::InvalidData(format!("failed to serialize control catalog: {e}"))
        })
    }
}
