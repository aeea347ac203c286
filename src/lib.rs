// Copyright (C) 2018 Stephane Raux. Distributed under the MIT license.

//! Request builder and client for the Google Maps Geocoding and Directions
//! web services.

#![deny(warnings)]

mod bounds;
mod client;
mod config;
mod err;
mod query;
mod request;
mod response;
mod sign;

pub use crate::bounds::{BoundingBox, LAT_DEGREE_IN_MILES, Span};
pub use crate::client::Client;
pub use crate::config::Config;
pub use crate::err::{Error, ErrorKind};
pub use crate::query::URL_DOMAIN;
pub use crate::request::{GeocodeRequest, LocationType, ServiceKind,
    result_type};
pub use crate::response::{Format, Response, Status};
pub use crate::sign::{UrlSigner, decode_url_safe, encode_url_safe};

use serde_derive::Serialize;

/// Latitude and longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
