use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one hike in an auto-assign batch. Failures carry a reason
/// string instead of aborting the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub hike_id: Uuid,
    pub hike_name: String,
    pub assigned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoAssignResponse {
    pub results: Vec<AssignmentResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignGuideRequest {
    pub guide_id: Uuid,
}
