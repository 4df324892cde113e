//! Decoding of ICS-20 acknowledgements.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;

use crate::expected_keepers::{AckParser, AckResponse, AckStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Ics20Ack {
    Result(String),
    Error(String),
}

/// Parses the JSON acknowledgement written by the ICS-20 transfer application.
///
/// `{"result": "<base64>"}` is a success carrying the decoded payload, `{"error": "..."}` a
/// failure. Anything else is malformed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ics20AckParser;

impl AckParser for Ics20AckParser {
    fn parse(&self, ack: &[u8]) -> Result<AckResponse, String> {
        let ack: Ics20Ack =
            serde_json::from_slice(ack).map_err(|err| format!("not an ICS-20 ack: {err}"))?;

        match ack {
            Ics20Ack::Result(payload) => {
                let payload = STANDARD
                    .decode(payload)
                    .map_err(|err| format!("invalid result payload: {err}"))?;

                Ok(AckResponse {
                    status: AckStatus::Success,
                    msg_responses: vec![payload],
                    error: None,
                })
            }
            Ics20Ack::Error(error) => Ok(AckResponse {
                status: AckStatus::Failure,
                msg_responses: Vec::new(),
                error: Some(error),
            }),
        }
    }
}
