//! Candles sub-client — OHLCV bars at a chosen timeframe.

use chrono::NaiveDate;

use crate::client::MoexClient;
use crate::domain::candle::Candle;
use crate::error::SdkError;
use crate::shared::{iss_date, Security, Timeframe};

/// Block key for the candles endpoint.
const BLOCK: &str = "candles";

pub struct Candles<'a> {
    pub(crate) client: &'a MoexClient,
}

impl<'a> Candles<'a> {
    /// Bars for `security` at `timeframe`, oldest first.
    ///
    /// `from` and `till` bound the range server-side; either may be omitted
    /// to take the server default. The candles block carries no BOARDID
    /// column, so the board on `security` only routes the URL.
    pub async fn get(
        &self,
        security: &Security,
        timeframe: Timeframe,
        from: Option<NaiveDate>,
        till: Option<NaiveDate>,
    ) -> Result<Vec<Candle>, SdkError> {
        let mut url = format!(
            "{}/candles.json?interval={}",
            security.securities_url(self.client.http.iss_url()),
            timeframe.as_interval(),
        );
        if let Some(from) = from {
            url.push_str(&format!("&from={}", iss_date(from)));
        }
        if let Some(till) = till {
            url.push_str(&format!("&till={}", iss_date(till)));
        }

        let table = self
            .client
            .http
            .get_table(&url, BLOCK, true, self.client.http.policy())
            .await?;
        if table.is_empty() {
            return Err(SdkError::NoData(format!(
                "no {} candles for {}",
                timeframe, security.secid
            )));
        }
        tracing::debug!(
            secid = %security.secid, timeframe = %timeframe, rows = table.len(),
            "candles loaded"
        );
        Ok(table.typed()?)
    }
}
