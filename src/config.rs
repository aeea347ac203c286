// Copyright (C) 2018 Stephane Raux. Distributed under the MIT license.

use crate::request::non_empty;
use crate::{Format, GeocodeRequest};
use serde_derive::{Deserialize, Serialize};
use std::io::Read;

/// Credentials and request defaults, usually read from a JSON file.
///
/// ```json
/// {"client_id": "gme-acme", "signing_key": "vNIXE0xscrmjlyV-12Nj_BvUPaw=",
///  "https": true, "language": "en"}
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub signing_key: Option<String>,
    #[serde(default)]
    pub https: bool,
    #[serde(default)]
    pub format: Option<Format>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl Config {
    pub fn from_config<R: Read>(config: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(config)
    }

    /// Fills in whatever `request` leaves unset. A configured format always
    /// replaces the request's.
    pub fn apply(&self, mut request: GeocodeRequest) -> GeocodeRequest {
        fill(&mut request.api_key, &self.api_key);
        fill(&mut request.client_id, &self.client_id);
        fill(&mut request.signing_key, &self.signing_key);
        fill(&mut request.language, &self.language);
        fill(&mut request.region, &self.region);
        if let Some(format) = self.format {
            request.format = format;
        }
        request
    }
}

fn fill(field: &mut Option<String>, default: &Option<String>) {
    if non_empty(field).is_none() {
        *field = default.clone();
    }
}
