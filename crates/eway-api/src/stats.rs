// Dashboard statistics

use tracing::debug;

use crate::client::BackendClient;
use crate::error::Error;
use crate::models::DashboardStats;

impl BackendClient {
    /// Fetch the admin dashboard counters.
    ///
    /// `GET /stats`
    pub async fn stats(&self) -> Result<DashboardStats, Error> {
        let url = self.endpoint("stats")?;
        debug!("fetching dashboard stats");
        self.get(url).await
    }
}
