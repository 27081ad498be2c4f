//! Where vouchers are fetched from before they are rendered.

use crate::voucher::Voucher;
use reqwest::StatusCode;
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("voucher {0:?} not found")]
    /// No voucher exists with the requested id
    NotFound(String),

    #[error(transparent)]
    /// The store could not be reached, or its answer could not be decoded
    Http(#[from] reqwest::Error),

    #[error("voucher store answered {status}: {body}")]
    /// The store answered with an unexpected status
    Status { status: u16, body: String },
}

/// A source of voucher records, looked up by id
pub trait VoucherSource: Send + Sync {
    fn fetch_voucher(&self, id: &str) -> impl Future<Output = Result<Voucher, FetchError>> + Send;
}

/// Reads vouchers from a Supabase table through its PostgREST interface
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseClient {
    pub fn new<U, K, T>(base_url: U, api_key: K, table: T) -> SupabaseClient
    where
        U: Into<String>,
        K: Into<String>,
        T: Into<String>,
    {
        SupabaseClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: table.into(),
        }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }
}

impl VoucherSource for SupabaseClient {
    async fn fetch_voucher(&self, id: &str) -> Result<Voucher, FetchError> {
        log::debug!("fetching voucher {id:?} from {}", self.table);
        let filter = format!("eq.{id}");
        let response = self
            .http
            .get(self.table_url())
            .query(&[("id", filter.as_str()), ("select", "*"), ("limit", "1")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        // PostgREST rejects ids that do not parse as the column type
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::NOT_ACCEPTABLE
        ) {
            return Err(FetchError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut rows: Vec<Voucher> = response.json().await?;
        if rows.is_empty() {
            return Err(FetchError::NotFound(id.to_string()));
        }
        Ok(rows.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_ignores_trailing_slashes() {
        let client = SupabaseClient::new("https://example.supabase.co/", "key", "voucher_PousadaPedraBranca");
        assert_eq!(
            client.table_url(),
            "https://example.supabase.co/rest/v1/voucher_PousadaPedraBranca"
        );
    }

    #[test]
    fn not_found_names_the_voucher() {
        let error = FetchError::NotFound("42".into());
        assert_eq!(error.to_string(), "voucher \"42\" not found");
    }
}
