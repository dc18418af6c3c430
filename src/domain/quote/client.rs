//! Quotes sub-client — realtime snapshots and capitalization.

use crate::client::MoexClient;
use crate::domain::quote::Quote;
use crate::error::SdkError;
use crate::shared::{Security, Table};

/// Block key for realtime data under the securities endpoint.
const BLOCK: &str = "marketdata";

pub struct Quotes<'a> {
    pub(crate) client: &'a MoexClient,
}

impl<'a> Quotes<'a> {
    /// Latest snapshot of `security` on its board.
    pub async fn latest(&self, security: &Security) -> Result<Quote, SdkError> {
        let table = self.fetch(security).await?;
        let row = table.row(0).ok_or_else(|| {
            SdkError::NoData(format!(
                "no marketdata rows for {} on {}",
                security.secid, security.board
            ))
        })?;
        Ok(Quote::try_from(row)?)
    }

    /// Issue capitalization of the board row, in rubles.
    pub async fn capitalization(&self, security: &Security) -> Result<f64, SdkError> {
        let table = self.fetch(security).await?;
        let row = table.row(0).ok_or_else(|| {
            SdkError::NoData(format!(
                "no marketdata rows for {} on {}",
                security.secid, security.board
            ))
        })?;
        row.opt_f64("ISSUECAPITALIZATION")?.ok_or_else(|| {
            SdkError::NoData(format!("no capitalization figure for {}", security.secid))
        })
    }

    /// Board rows projected to `columns`, in the given order.
    ///
    /// A column ISS did not send is an error, never a padded null. The table
    /// may be empty when the board has no marketdata row.
    pub async fn table(&self, security: &Security, columns: &[&str]) -> Result<Table, SdkError> {
        let table = self.fetch(security).await?;
        Ok(table.project(columns)?)
    }

    async fn fetch(&self, security: &Security) -> Result<Table, SdkError> {
        let url = format!(
            "{}.json",
            security.securities_url(self.client.http.iss_url())
        );
        let table = self
            .client
            .http
            .get_table(&url, BLOCK, true, self.client.http.policy())
            .await?;
        Ok(table.filter_eq("BOARDID", &security.board)?)
    }
}
