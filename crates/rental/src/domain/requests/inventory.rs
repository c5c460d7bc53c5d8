use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    #[param(example = "2025-06-01")]
    pub start_date: String,

    #[param(example = "2025-06-03")]
    pub end_date: String,
}
