use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::report::Report;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataConnectionParams {
    pub host:     String,
    pub database: String,
    pub user:     String,
    pub password: String,
}

impl fmt::Debug for MetadataConnectionParams {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataConnectionParams")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Verdict of the metadata source for one sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleValidity {
    pub valid: bool,
    /// Empty when there is nothing to report.
    pub error: String,
}

pub trait MetadataConnection {
    fn validate_sample(
        &mut self,
        molis_id: &str,
        sequencing_date: NaiveDate,
        allow_historical_samples: bool,
    ) -> anyhow::Result<SampleValidity>;
    fn close(&mut self) -> anyhow::Result<()>;
}

pub trait MetadataSource {
    type Connection: MetadataConnection;

    fn connect(&self, params: &MetadataConnectionParams) -> anyhow::Result<Self::Connection>;
}

/// Owns an open metadata connection and closes it when dropped.
#[must_use = "dropping this guard closes the metadata connection"]
pub struct ConnectionGuard<C: MetadataConnection> {
    connection: Option<C>,
}

impl<C: MetadataConnection> ConnectionGuard<C> {
    #[inline]
    pub fn acquire<S>(source: &S, params: &MetadataConnectionParams) -> anyhow::Result<Self>
    where
        S: MetadataSource<Connection = C> + ?Sized,
    {
        debug!(host = %params.host, database = %params.database, "Opening metadata connection");
        Ok(Self {
            connection: Some(source.connect(params)?),
        })
    }

    #[inline]
    pub fn connection(&mut self) -> anyhow::Result<&mut C> {
        self.connection
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("metadata connection already released"))
    }

    /// Closes the connection, reporting a failure to close.
    #[inline]
    pub fn release(mut self) -> anyhow::Result<()> {
        match self.connection.take() {
            Some(mut connection) => connection.close(),
            None => Ok(()),
        }
    }
}

impl<C: MetadataConnection> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            if let Err(error) = connection.close() {
                warn!("Failed to close metadata connection: {error:#}");
            }
        }
    }
}

/// Validates each sample's metadata over a single connection and appends a
/// flagged outcome for every sample the source reported an error for.
/// Samples without an error add nothing.
#[inline]
pub fn validate_metadata<S>(
    source: &S,
    params: &MetadataConnectionParams,
    molis_ids: &[String],
    sequencing_date: NaiveDate,
    allow_historical_samples: bool,
    report: &mut Report,
) -> anyhow::Result<()>
where
    S: MetadataSource + ?Sized,
{
    let mut guard = ConnectionGuard::acquire(source, params)?;
    {
        let connection = guard.connection()?;
        for molis_id in molis_ids {
            let validity =
                connection.validate_sample(molis_id, sequencing_date, allow_historical_samples)?;
            debug!(molis_id = %molis_id, valid = validity.valid, "Validated sample metadata");
            if !validity.error.is_empty() {
                report.flag(format!("{molis_id}: {}", validity.error), validity.valid);
            }
        }
    }
    guard.release()
}
