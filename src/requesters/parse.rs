// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Free text to ledger entries via structured model output.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::Config;
use crate::error::{TallyError, TallyResult};
use crate::llm::{ChatRequest, ResponseFormat, TextGenerator};
use crate::models::{Category, LedgerEntry};
use crate::utils::strip_code_fence;

pub const SYSTEM_PROMPT: &str = "You are a bookkeeping assistant. Split the user's text into \
ledger records without translating it. Every record has a category, an amount and a \
description. The amount carries no currency unit and is negative when the text describes \
money being spent.";

pub const SCHEMA_NAME: &str = "accounting_schema";

#[derive(Debug, Clone, Deserialize)]
pub struct AccountingsReply {
    pub accountings: Vec<ParsedItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedItem {
    pub category: String,
    pub amount: Decimal,
    pub description: String,
}

impl AccountingsReply {
    /// One entry per item, in reply order, stamped with the current time.
    pub fn into_entries(self) -> Vec<LedgerEntry> {
        self.accountings
            .into_iter()
            .map(|item| {
                LedgerEntry::new(
                    Category::from_name_or_other(&item.category),
                    item.amount,
                    item.description,
                )
            })
            .collect()
    }
}

/// JSON schema the reply must satisfy; no extra fields at either level.
pub fn schema() -> Value {
    let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
    json!({
        "type": "object",
        "description": "A collection of accounting records",
        "properties": {
            "accountings": {
                "type": "array",
                "description": "List of accounting objects",
                "items": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "The category of the transaction",
                            "enum": names
                        },
                        "amount": {
                            "type": "number",
                            "description": "The monetary amount; negative for spending"
                        },
                        "description": {
                            "type": "string",
                            "description": "The detailed description of the transaction"
                        }
                    },
                    "required": ["category", "amount", "description"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["accountings"],
        "additionalProperties": false
    })
}

pub fn build_request(text: &str) -> ChatRequest {
    ChatRequest {
        system: SYSTEM_PROMPT.to_string(),
        user: text.to_string(),
        format: ResponseFormat::JsonSchema {
            name: SCHEMA_NAME.to_string(),
            description: "A collection of accounting records".to_string(),
            schema: schema(),
        },
    }
}

pub fn decode_reply(raw: &str) -> TallyResult<AccountingsReply> {
    serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| TallyError::Decode(format!("unexpected model reply: {}", e)))
}

/// Ask the model to classify `text`. Nothing is persisted here.
pub fn request_entries(
    config: &Config,
    generator: &dyn TextGenerator,
    text: &str,
) -> TallyResult<Vec<LedgerEntry>> {
    config.openai_api_key()?;
    let raw = generator.generate(config, &build_request(text))?;
    let reply = decode_reply(&raw)?;
    tracing::debug!(items = reply.accountings.len(), "model reply decoded");
    Ok(reply.into_entries())
}
