use anyhow::Context;
use giftloop_core::store::{StoreError, StoreResult};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Thin client over the datastore's REST interface and its edge functions.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    fn check(resource: &str, resp: Response) -> StoreResult<Response> {
        let status = resp.status();
        if status == StatusCode::CONFLICT {
            return Err(StoreError::Conflict);
        }
        if !status.is_success() {
            return Err(StoreError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    /// `GET /rest/v1/<table>` with PostgREST filters such as
    /// `("telegram_id", "eq.42")`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> StoreResult<Vec<T>> {
        let url = table_url(&self.base_url, table, filters);
        let resp = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .with_context(|| format!("Request to {} failed", table))?;
        let resp = Self::check(table, resp)?;
        Ok(resp
            .json()
            .await
            .with_context(|| format!("Unexpected rows from {}", table))?)
    }

    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> StoreResult<Option<T>> {
        Ok(self.select(table, filters).await?.into_iter().next())
    }

    /// Inserts one row and returns it as stored.
    pub async fn insert<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        table: &str,
        row: &B,
    ) -> StoreResult<T> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let resp = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .with_context(|| format!("Insert into {} failed", table))?;
        let resp = Self::check(table, resp)?;
        let rows: Vec<T> = resp
            .json()
            .await
            .with_context(|| format!("Unexpected rows from {}", table))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Empty(table.to_string()))
    }

    async fn post_function<B: Serialize + ?Sized>(
        &self,
        function: &str,
        body: &B,
    ) -> StoreResult<Response> {
        let url = format!("{}/functions/v1/{}", self.base_url, function);
        let resp = self
            .authorized(self.client.post(&url))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Call to {} failed", function))?;
        Self::check(function, resp)
    }

    pub async fn invoke<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        function: &str,
        body: &B,
    ) -> StoreResult<T> {
        let resp = self.post_function(function, body).await?;
        Ok(resp
            .json()
            .await
            .with_context(|| format!("Unexpected response from {}", function))?)
    }

    /// Calls a function for its side effect; the response body is discarded.
    pub async fn invoke_unit<B: Serialize + ?Sized>(&self, function: &str, body: &B) -> StoreResult<()> {
        self.post_function(function, body).await?;
        Ok(())
    }
}

fn table_url(base_url: &str, table: &str, filters: &[(&str, String)]) -> String {
    let mut url = format!("{}/rest/v1/{}?select=*", base_url, table);
    for (column, condition) in filters {
        url.push('&');
        url.push_str(column);
        url.push('=');
        url.push_str(&urlencoding::encode(condition));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_are_encoded_into_query() {
        let base = "https://db.example.com";
        assert_eq!(
            table_url(base, "user_profiles", &[("telegram_id", "eq.42".to_string())]),
            "https://db.example.com/rest/v1/user_profiles?select=*&telegram_id=eq.42"
        );
        assert_eq!(
            table_url(base, "payouts", &[("status", "in.(pending,paid)".to_string())]),
            "https://db.example.com/rest/v1/payouts?select=*&status=in.%28pending%2Cpaid%29"
        );
    }
}
