// src/requests.rs
use crate::error::{LocatorError, QueryFailure};
use crate::query::OverpassQuery;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Response as HttpResponse;
use serde_json::Value;

impl crate::OverpassClient {
    /// Sends one query as `data=<urlencoded query>` and returns the `elements` array.
    ///
    /// A JSON body without a usable `elements` array (missing, `null`, wrong type, or a `null`
    /// document) yields an empty vector. Transport errors, error statuses and non-JSON bodies
    /// are returned as `LocatorError::QueryFailed`.
    pub(crate) async fn _post_query(&self, query: &OverpassQuery) -> Result<Vec<Value>, LocatorError> {
        let form_body = query.to_form_body();

        log::debug!(
            "Preparing request: Method=POST, URL={}, Query={}",
            self.endpoint.as_str(),
            query.build()
        );

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body(form_body)
            .send()
            .await
            .map_err(QueryFailure::Transport)?;

        let document = self._process_response(response).await?;
        Ok(extract_elements(document))
    }

    // Reads the body and classifies the response; success bodies must be JSON.
    pub(crate) async fn _process_response(
        &self,
        response: HttpResponse,
    ) -> Result<Value, LocatorError> {
        let status = response.status();
        let response_url = response.url().to_string();

        let body_bytes = response.bytes().await.map_err(QueryFailure::Transport)?;

        if !status.is_success() {
            let body_text = String::from_utf8_lossy(&body_bytes);
            log::warn!(
                "Request to '{}' failed with status {}. Response body: {}",
                response_url,
                status,
                body_text
            );
            return Err(QueryFailure::from_response(status.as_u16(), &body_text).into());
        }

        log::debug!(
            "Request successful. Status: {}, body size: {} bytes",
            status,
            body_bytes.len()
        );

        serde_json::from_slice::<Value>(&body_bytes).map_err(|e| {
            log::error!(
                "Response from '{}' is not JSON. Status: {}. Error: {}. Body: {}",
                response_url,
                status,
                e,
                String::from_utf8_lossy(&body_bytes)
            );
            QueryFailure::InvalidJson(e).into()
        })
    }
}

/// Pulls the `elements` array out of a response document, defaulting to empty.
pub(crate) fn extract_elements(document: Value) -> Vec<Value> {
    match document {
        Value::Object(mut map) => match map.remove("elements") {
            Some(Value::Array(elements)) => elements,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                log::warn!("Ignoring non-array 'elements' field: {}", other);
                Vec::new()
            }
        },
        Value::Null => Vec::new(),
        other => {
            log::warn!("Ignoring response document that is not an object: {}", other);
            Vec::new()
        }
    }
}
