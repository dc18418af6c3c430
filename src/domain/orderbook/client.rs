//! Orderbooks sub-client — symmetric depth snapshots.

use crate::client::MoexClient;
use crate::domain::orderbook::convert::level_from_row;
use crate::domain::orderbook::OrderLevel;
use crate::error::SdkError;
use crate::shared::Security;

/// Block key for the order book endpoint.
const BLOCK: &str = "orderbook";

pub struct Orderbooks<'a> {
    pub(crate) client: &'a MoexClient,
}

impl<'a> Orderbooks<'a> {
    /// Up to `depth` levels per side of the book midpoint, best levels
    /// adjacent to the middle of the returned slice.
    ///
    /// ISS serves the block sorted by price with bids below asks, so the
    /// midpoint of the board's rows is the spread. A thin book yields fewer
    /// rows rather than wrapping past the edges; an empty window is
    /// [`SdkError::NoData`].
    pub async fn depth(
        &self,
        security: &Security,
        depth: usize,
    ) -> Result<Vec<OrderLevel>, SdkError> {
        let url = format!(
            "{}/orderbook.json",
            security.securities_url(self.client.http.iss_url())
        );
        let table = self
            .client
            .http
            .get_table(&url, BLOCK, true, self.client.http.policy())
            .await?;
        let board = table.filter_eq("BOARDID", &security.board)?;

        let (start, end) = depth_window(board.len(), depth);
        let stamp = chrono::Local::now().naive_local();
        let levels = board
            .rows()
            .skip(start)
            .take(end - start)
            .map(|row| level_from_row(row, stamp))
            .collect::<Result<Vec<_>, _>>()?;

        if levels.is_empty() {
            return Err(SdkError::NoData(format!(
                "empty order book for {} on {}",
                security.secid, security.board
            )));
        }
        tracing::debug!(secid = %security.secid, levels = levels.len(), "order book window");
        Ok(levels)
    }
}

/// Index window `[mid - depth, mid + depth)` over `len` rows, saturating at
/// both edges.
fn depth_window(len: usize, depth: usize) -> (usize, usize) {
    let mid = len / 2;
    (mid.saturating_sub(depth), (mid + depth).min(len))
}
