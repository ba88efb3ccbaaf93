//! Registration links
//!
//! A registration link carries a token in its `register` query parameter.
//! The token is base64 over the JSON object `{"unitId": <id>|null}` and
//! pre-selects a unit on the registration form.

use base64::{
    engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD},
    Engine as _,
};
use scout_core::UnitId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::{form_urlencoded, Url};

use crate::error::AppError;

/// Page the link points at, relative to the site base
pub const REGISTRATION_PAGE: &str = "register.html";

/// Query parameter holding the token
pub const REGISTRATION_PARAM: &str = "register";

#[derive(Serialize)]
struct EncodedPayload {
    #[serde(rename = "unitId")]
    unit_id: Option<i64>,
}

#[derive(Deserialize)]
struct DecodedPayload {
    #[serde(rename = "unitId", default)]
    unit_id: Value,
}

/// Decoded registration token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrationToken {
    /// Unit to pre-select, `None` lets the user choose
    pub unit_id: Option<UnitId>,
}

impl RegistrationToken {
    #[must_use]
    pub fn new(unit_id: Option<UnitId>) -> Self {
        Self { unit_id }
    }

    /// Encode as standard base64 JSON
    pub fn encode(&self) -> Result<String, AppError> {
        let payload = EncodedPayload {
            unit_id: self.unit_id.map(UnitId::into_inner),
        };
        let json = serde_json::to_vec(&payload).map_err(AppError::internal)?;
        Ok(STANDARD.encode(json))
    }

    /// Decode a token
    ///
    /// Accepts padded or unpadded, standard or URL-safe base64. Spaces are
    /// read as `+`, since form decoding turns an unescaped `+` into a space.
    /// A missing or null `unitId` decodes to `None`.
    pub fn decode(token: &str) -> Result<Self, AppError> {
        let cleaned = token.trim().replace(' ', "+");
        if cleaned.is_empty() {
            return Err(AppError::InvalidRegistrationToken("empty token".to_string()));
        }

        let bytes = [STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD]
            .iter()
            .find_map(|engine| engine.decode(&cleaned).ok())
            .ok_or_else(|| AppError::InvalidRegistrationToken("not base64".to_string()))?;

        let payload: DecodedPayload = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::InvalidRegistrationToken(e.to_string()))?;

        let unit_id = match &payload.unit_id {
            Value::Null => None,
            raw => Some(UnitId::from_json(raw).ok_or_else(|| {
                AppError::InvalidRegistrationToken(format!("unitId is not a unit id: {raw}"))
            })?),
        };

        Ok(Self { unit_id })
    }

    /// Full registration URL under `base_url`
    ///
    /// The page is resolved against the base, so the base should end in `/`.
    pub fn to_url(&self, base_url: &str) -> Result<String, AppError> {
        let token = self.encode()?;
        let mut url = Url::parse(base_url)
            .and_then(|base| base.join(REGISTRATION_PAGE))
            .map_err(|e| AppError::validation(format!("registration base url: {e}")))?;
        url.query_pairs_mut()
            .clear()
            .append_pair(REGISTRATION_PARAM, &token);
        Ok(url.into())
    }

    /// Extract and decode the token from a registration URL or query string
    ///
    /// Returns `Ok(None)` when the URL carries no token.
    pub fn from_url(url: &str) -> Result<Option<Self>, AppError> {
        let token = match Url::parse(url) {
            Ok(parsed) => find_token(parsed.query_pairs()),
            Err(_) => {
                let query = url.split_once('?').map_or(url, |(_, q)| q);
                let query = query.split_once('#').map_or(query, |(q, _)| q);
                find_token(form_urlencoded::parse(query.as_bytes()))
            }
        };

        token.map(|value| Self::decode(&value)).transpose()
    }
}

fn find_token(mut pairs: form_urlencoded::Parse<'_>) -> Option<String> {
    pairs
        .find(|(key, _)| *key == REGISTRATION_PARAM)
        .map(|(_, value)| value.into_owned())
}
