// Grid handle
//
// The grid master is addressed purely through its reference. restart()
// drives the restartservices function with the fixed parameters that host
// record changes require to take effect.

use reqwest::StatusCode;
use tracing::debug;

use crate::error::Error;
use crate::wapi::client::{ObjectRef, WapiClient, expect_status};

/// Handle for the grid master.
pub struct Grid<'a> {
    client: &'a WapiClient,
    reference: Option<ObjectRef>,
}

impl<'a> Grid<'a> {
    pub(crate) fn new(client: &'a WapiClient) -> Self {
        Self {
            client,
            reference: None,
        }
    }
}

impl Grid<'_> {
    /// Resolve and cache the grid master's reference.
    pub async fn resolve(&mut self) -> Result<ObjectRef, Error> {
        if let Some(r) = &self.reference {
            return Ok(r.clone());
        }
        let reference = self
            .client
            .lookup_ref("grid", "could not get grid _ref")
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "grid",
                key: "grid".into(),
            })?;
        self.reference = Some(reference.clone());
        Ok(reference)
    }

    /// Restart grid services so saved changes take effect: members
    /// sequentially, 10 seconds apart, all services, only where needed.
    pub async fn restart(&mut self) -> Result<(), Error> {
        let reference = self.resolve().await?;
        let path = format!(
            "{reference}?_function=restartservices&member_order=SEQUENTIALLY\
             &sequential_delay=10&service_option=ALL&restart_option=RESTART_IF_NEEDED"
        );
        debug!("restarting grid services");
        let resp = self.client.post_empty(&path).await?;
        expect_status(resp, StatusCode::OK, "could not restart grid services").await?;
        Ok(())
    }
}
