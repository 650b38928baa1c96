// Device inventory endpoints
//
// CRUD over `/api/switches` plus the SNMP topology re-sync trigger.
// Mutations require an admin session; the backend enforces the role.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::SwitchClient;
use crate::error::Error;
use crate::models::{CreateDeviceRequest, RawDevice, UpdateDeviceRequest};

impl SwitchClient {
    /// List all managed devices, including their section configuration.
    ///
    /// `GET /api/switches`
    pub async fn list_switches(&self) -> Result<Vec<RawDevice>, Error> {
        let url = self.api_url("switches")?;
        debug!("listing devices");
        // The backend marshals an empty inventory as JSON null.
        let devices: Option<Vec<RawDevice>> = self.get(url).await?;
        Ok(devices.unwrap_or_default())
    }

    /// Register a new device. The backend probes it over SNMP to
    /// auto-detect its name and derive an initial section layout, which
    /// can take a while -- the request is cancellable through `cancel`.
    ///
    /// `POST /api/switches`
    pub async fn create_switch(
        &self,
        req: &CreateDeviceRequest,
        cancel: &CancellationToken,
    ) -> Result<RawDevice, Error> {
        let url = self.api_url("switches")?;
        debug!(ip = %req.ip_address, "creating device");

        let fut = self.http().post(url).json(req).send();
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Error::Cancelled),
            resp = fut => Self::parse_json(resp.map_err(Error::Transport)?).await,
        }
    }

    /// Persist a full device record, including edited sections.
    ///
    /// `PUT /api/switches` -- success/failure only.
    pub async fn update_switch(&self, req: &UpdateDeviceRequest) -> Result<(), Error> {
        let url = self.api_url("switches")?;
        debug!(id = req.id, "updating device");
        self.put(url, req).await
    }

    /// Remove a device and its configuration.
    ///
    /// `DELETE /api/switches?id={id}`
    pub async fn delete_switch(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url_with_id("switches", id)?;
        debug!(id, "deleting device");
        self.delete(url).await
    }

    /// Re-derive the detected topology from the live device, replacing
    /// the stored section configuration.
    ///
    /// `POST /api/switches/sync?id={id}`
    pub async fn sync_switch(&self, id: i64) -> Result<RawDevice, Error> {
        let url = self.api_url_with_id("switches/sync", id)?;
        debug!(id, "re-syncing device topology");
        let resp = self
            .http()
            .post(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_json(resp).await
    }
}
