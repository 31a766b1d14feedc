use crate::error::{Error, Operation, Result, expect_status};
use crate::github::transport::Transport;
use serde::de::DeserializeOwned;

/// Records requested per page; the largest page size the API accepts.
pub const PER_PAGE: u32 = 100;

/// Fetches every page of a listing endpoint, starting at page 1.
///
/// `filters` are sent with every page request in addition to `per_page` and
/// `page`. Stops after the first page that comes back empty or shorter than
/// [`PER_PAGE`]. Any non-200 page aborts the whole fetch and nothing collected
/// so far is returned.
pub async fn fetch_all_pages<T, Tr>(
    transport: &Tr,
    operation: Operation,
    path: &str,
    filters: &[(&str, &str)],
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    Tr: Transport,
{
    let mut all_items = Vec::new();
    let mut page = 1;

    loop {
        let mut query: Vec<(&str, String)> = filters
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect();
        query.push(("per_page", PER_PAGE.to_string()));
        query.push(("page", page.to_string()));

        let response = transport
            .get(path, &query)
            .await
            .map_err(|e| Error::Transport {
                operation,
                message: e.to_string(),
            })?;
        expect_status(operation, 200, response.status, &response.body)?;

        let items: Vec<T> = serde_json::from_str(&response.body)
            .map_err(|source| Error::Decode { operation, source })?;
        if items.is_empty() {
            break;
        }

        let is_last = items.len() < PER_PAGE as usize;
        all_items.extend(items);
        if is_last {
            break;
        }
        page += 1;
    }

    Ok(all_items)
}
