// Telemetry snapshot endpoint
//
// One GET per poll cycle. The payload shape varies by backend version;
// normalization to `StatusResponse` happens here so downstream code
// only ever sees the canonical form.

use tracing::debug;

use crate::client::SwitchClient;
use crate::error::Error;
use crate::models::{StatusPayload, StatusResponse};

impl SwitchClient {
    /// Fetch one complete telemetry snapshot for a device.
    ///
    /// `GET /api/switches/status?id={id}`
    ///
    /// Accepts both the `{ system, sections }` object and the legacy
    /// bare-array shape, returning the canonical [`StatusResponse`]
    /// either way.
    pub async fn get_status(&self, id: i64) -> Result<StatusResponse, Error> {
        let url = self.api_url_with_id("switches/status", id)?;
        debug!(id, "fetching status snapshot");
        let payload: StatusPayload = self.get(url).await?;
        Ok(StatusResponse::from(payload))
    }
}
