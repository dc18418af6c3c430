//! Trades sub-client — full-feed pagination by trade number.

use crate::client::MoexClient;
use crate::domain::trade::Trade;
use crate::error::SdkError;
use crate::shared::Security;

/// Block key for the trade feed endpoint.
const BLOCK: &str = "trades";

pub struct Trades<'a> {
    pub(crate) client: &'a MoexClient,
}

impl<'a> Trades<'a> {
    /// Every trade ISS currently serves for the instrument, in feed order.
    ///
    /// The endpoint pages by trade number; this follows the pages until the
    /// feed is drained. No trades at all is [`SdkError::NoData`].
    pub async fn all(&self, security: &Security) -> Result<Vec<Trade>, SdkError> {
        self.paginate(security, None).await
    }

    /// Trades strictly after `tradeno`, for resuming an earlier pull.
    pub async fn since(&self, security: &Security, tradeno: i64) -> Result<Vec<Trade>, SdkError> {
        self.paginate(security, Some(tradeno)).await
    }

    async fn paginate(
        &self,
        security: &Security,
        cursor: Option<i64>,
    ) -> Result<Vec<Trade>, SdkError> {
        let base = format!(
            "{}/trades.json",
            security.securities_url(self.client.http.iss_url())
        );
        let mut cursor = cursor;
        let mut first_page = true;
        let mut trades: Vec<Trade> = Vec::new();

        loop {
            let url = match cursor {
                None => base.clone(),
                Some(tradeno) => format!("{}?tradeno={}&next_trade=1", base, tradeno),
            };
            let page = self
                .client
                .http
                .get_table(&url, BLOCK, true, self.client.http.policy())
                .await?;
            let rows: Vec<Trade> = page.typed()?;

            // An empty page, or one starting at or below the cursor (the
            // server replaying rows we already hold), means the feed is
            // drained. The terminal page is never appended.
            let drained = match (rows.first(), cursor) {
                (None, _) => true,
                (Some(first), Some(cursor)) => first.tradeno <= cursor,
                (Some(_), None) => false,
            };
            if drained {
                if first_page {
                    return Err(SdkError::NoData(format!(
                        "no trades for {}",
                        security.secid
                    )));
                }
                break;
            }
            first_page = false;

            tracing::debug!(secid = %security.secid, rows = rows.len(), "trades page");
            trades.extend(rows);
            cursor = trades.last().map(|trade| trade.tradeno);
        }

        Ok(trades)
    }
}
