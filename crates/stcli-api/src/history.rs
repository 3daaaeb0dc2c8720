//! Device history endpoint and its paging cursor.
//!
//! History responses are paged via `_links.next` hrefs. [`HistoryPager`]
//! exposes the current page's items plus `has_next`/`next_page`, so callers
//! decide how far to walk the history (bounded accumulation or interactive
//! page-at-a-time display).

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{DeviceActivity, DeviceHistoryRequest, ItemsList};

/// Cursor over paged device-history results.
pub struct HistoryPager<'a> {
    client: &'a ApiClient,
    /// Items of the page fetched most recently.
    pub items: Vec<DeviceActivity>,
    next_href: Option<String>,
}

impl<'a> HistoryPager<'a> {
    fn from_page(client: &'a ApiClient, page: ItemsList<DeviceActivity>) -> Self {
        let next_href = page.links.and_then(|links| links.next).map(|l| l.href);
        Self {
            client,
            items: page.items,
            next_href,
        }
    }

    /// `true` if the server reported another page after the current one.
    pub fn has_next(&self) -> bool {
        self.next_href.is_some()
    }

    /// Fetch the next page, replacing `items`. No-op when exhausted.
    pub async fn next_page(&mut self) -> Result<(), Error> {
        let Some(href) = self.next_href.take() else {
            self.items.clear();
            return Ok(());
        };

        debug!("fetching next history page");
        let url = self.client.href_url(&href)?;
        let page: ItemsList<DeviceActivity> = self.client.get_url(url).await?;

        self.next_href = page.links.and_then(|links| links.next).map(|l| l.href);
        self.items = page.items;
        Ok(())
    }
}

impl ApiClient {
    /// Query device history, returning a pager positioned at the first page.
    ///
    /// `GET /v1/history/devices`
    pub async fn device_history(
        &self,
        request: &DeviceHistoryRequest,
    ) -> Result<HistoryPager<'_>, Error> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(location_id) = request.location_id {
            params.push(("locationId", location_id.to_string()));
        }
        if let Some(device_id) = request.device_id {
            params.push(("deviceId", device_id.to_string()));
        }
        params.push(("limit", request.limit.to_string()));
        if let Some(after) = request.after {
            params.push(("after", after.to_string()));
        }
        if let Some(before) = request.before {
            params.push(("before", before.to_string()));
        }
        if request.oldest_first {
            params.push(("oldestFirst", "true".to_owned()));
        }

        let page: ItemsList<DeviceActivity> =
            self.get_with_params("history/devices", &params).await?;
        Ok(HistoryPager::from_page(self, page))
    }
}
