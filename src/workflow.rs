// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Hosted workflow endpoint that turns one message into accounting items.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::Config;
use crate::error::{TallyError, TallyResult};
use crate::requesters::parse::AccountingsReply;
use crate::utils::http_client;

const TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    output: Option<T>,
}

/// Unwrap a `{success, output}` envelope. Any failure reads as a generic server error.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> TallyResult<T> {
    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(Envelope {
            success: true,
            output: Some(out),
        }) => Ok(out),
        Ok(_) => Err(TallyError::Server("Unknown error".into())),
        Err(e) => {
            tracing::debug!(error = %e, "workflow envelope did not decode");
            Err(TallyError::Server("Unknown error".into()))
        }
    }
}

pub fn accountings_from_text(config: &Config, text: &str) -> TallyResult<AccountingsReply> {
    let key = config.workflow_api_key()?;
    let url = format!(
        "{}/api/workflows/{}/execute",
        config.workflow_base_url().trim_end_matches('/'),
        config.workflow_id()?
    );
    tracing::debug!(%url, "workflow request");
    let client = http_client(TIMEOUT_SECS)?;
    let resp = client
        .post(&url)
        .header("X-API-Key", key)
        .json(&json!({ "message": text }))
        .send()?;
    let body = resp.text()?;
    tracing::debug!(bytes = body.len(), "workflow response");
    decode_envelope(&body)
}
