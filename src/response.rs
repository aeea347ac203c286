// Copyright (C) 2018 Stephane Raux. Distributed under the MIT license.

use crate::{Coordinates, Error, ErrorKind};
use log::{debug, warn};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, self};
use xmltree::Element;

/// Response format requested from the service.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }
}

impl Default for Format {
    fn default() -> Self {Format::Json}
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of the `status` field of a response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    UnknownError,
    NotFound,
    MaxWaypointsExceeded,
    MaxRouteLengthExceeded,
    Other(String),
}

impl Status {
    pub fn from_code(code: &str) -> Status {
        match code {
            "OK" => Status::Ok,
            "ZERO_RESULTS" => Status::ZeroResults,
            "OVER_QUERY_LIMIT" => Status::OverQueryLimit,
            "REQUEST_DENIED" => Status::RequestDenied,
            "INVALID_REQUEST" => Status::InvalidRequest,
            "UNKNOWN_ERROR" => Status::UnknownError,
            "NOT_FOUND" => Status::NotFound,
            "MAX_WAYPOINTS_EXCEEDED" => Status::MaxWaypointsExceeded,
            "MAX_ROUTE_LENGTH_EXCEEDED" => Status::MaxRouteLengthExceeded,
            other => Status::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Status::Ok => "OK",
            Status::ZeroResults => "ZERO_RESULTS",
            Status::OverQueryLimit => "OVER_QUERY_LIMIT",
            Status::RequestDenied => "REQUEST_DENIED",
            Status::InvalidRequest => "INVALID_REQUEST",
            Status::UnknownError => "UNKNOWN_ERROR",
            Status::NotFound => "NOT_FOUND",
            Status::MaxWaypointsExceeded => "MAX_WAYPOINTS_EXCEEDED",
            Status::MaxRouteLengthExceeded => "MAX_ROUTE_LENGTH_EXCEEDED",
            Status::Other(code) => code,
        }
    }

    /// `OK` and `ZERO_RESULTS` are the only statuses carrying a usable body.
    pub fn is_success(&self) -> bool {
        match self {
            Status::Ok | Status::ZeroResults => true,
            _ => false,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parsed response body.
#[derive(Clone, Debug)]
pub enum Response {
    Json(Value),
    Xml(Element),
}

impl Response {
    /// Parses `body` according to `format` and checks its status.
    pub fn parse(format: Format, body: &[u8]) -> Result<Response, Error> {
        let response = match format {
            Format::Json => serde_json::from_slice::<Value>(body)
                .map(Response::Json)
                .map_err(|e| Error::new(ErrorKind::ResponseFormat, e))?,
            Format::Xml => Element::parse(body)
                .map(Response::Xml)
                .map_err(|e| Error::new(ErrorKind::ResponseFormat,
                    e.to_string()))?,
        };
        let status = response.status().ok_or_else(|| {
            Error::new(ErrorKind::ResponseFormat, "Missing status")
        })?;
        debug!("Parsed {} response with status {}", format, status);
        if status.is_success() {
            return Ok(response)
        }
        warn!("Service answered with status {}", status);
        let kind = ErrorKind::Api(status);
        Err(match response.error_message() {
            Some(message) => Error::new(kind, message),
            None => kind.into(),
        })
    }

    pub fn status(&self) -> Option<Status> {
        match self {
            Response::Json(obj) => obj.get("status")
                .and_then(|s| s.as_str())
                .map(Status::from_code),
            Response::Xml(root) => child_text(root, &["status"])
                .map(|s| Status::from_code(&s)),
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            Response::Json(obj) => obj.get("error_message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            Response::Xml(root) => child_text(root, &["error_message"]),
        }
    }

    /// Location of the first geocoding result, if any.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let (lat, long) = match self {
            Response::Json(obj) => {
                let pos = obj.pointer("/results/0/geometry/location")?;
                let lat = pos.get("lat").and_then(|lat| lat.as_f64());
                let long = pos.get("lng").and_then(|long| long.as_f64());
                (lat, long)
            }
            Response::Xml(root) => {
                let path = ["result", "geometry", "location"];
                let number = |name| {
                    let mut path = path.to_vec();
                    path.push(name);
                    child_text(root, &path).and_then(|s| s.trim().parse().ok())
                };
                (number("lat"), number("lng"))
            }
        };
        lat.and_then(|lat| long.map(|long| (lat, long)))
            .map(|(latitude, longitude)| Coordinates {latitude, longitude})
    }
}

fn child_text(root: &Element, path: &[&str]) -> Option<String> {
    let mut e = root;
    for name in path {
        e = e.get_child(*name)?;
    }
    e.get_text().map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON_OK: &str = r#"{
        "results": [{
            "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
            "geometry": {
                "location": {"lat": 37.4224764, "lng": -122.0842499},
                "location_type": "ROOFTOP"
            }
        }],
        "status": "OK"
    }"#;

    const XML_OK: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>
        <GeocodeResponse>
          <status>OK</status>
          <result>
            <type>street_address</type>
            <geometry>
              <location>
                <lat>37.4224764</lat>
                <lng>-122.0842499</lng>
              </location>
            </geometry>
          </result>
        </GeocodeResponse>";

    #[test]
    fn json_coordinates() {
        let r = Response::parse(Format::Json, JSON_OK.as_bytes()).unwrap();
        assert_eq!(r.status(), Some(Status::Ok));
        assert_eq!(r.coordinates(), Some(Coordinates {
            latitude: 37.4224764,
            longitude: -122.0842499,
        }));
    }

    #[test]
    fn xml_coordinates() {
        let r = Response::parse(Format::Xml, XML_OK.as_bytes()).unwrap();
        assert_eq!(r.status(), Some(Status::Ok));
        assert_eq!(r.coordinates(), Some(Coordinates {
            latitude: 37.4224764,
            longitude: -122.0842499,
        }));
    }

    #[test]
    fn zero_results_is_not_an_error() {
        let body = br#"{"results": [], "status": "ZERO_RESULTS"}"#;
        let r = Response::parse(Format::Json, body).unwrap();
        assert_eq!(r.status(), Some(Status::ZeroResults));
        assert_eq!(r.coordinates(), None);
    }

    #[test]
    fn denied_request_carries_message() {
        let body = br#"{
            "error_message": "The provided API key is invalid.",
            "results": [],
            "status": "REQUEST_DENIED"
        }"#;
        let e = Response::parse(Format::Json, body).unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::Api(Status::RequestDenied));
        let cause = std::error::Error::source(&e).map(|c| c.to_string());
        assert_eq!(cause.as_ref().map(String::as_str),
            Some("The provided API key is invalid."));
    }

    #[test]
    fn xml_over_query_limit() {
        let body = "<GeocodeResponse><status>OVER_QUERY_LIMIT</status>\
            </GeocodeResponse>";
        let e = Response::parse(Format::Xml, body.as_bytes()).unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::Api(Status::OverQueryLimit));
    }

    #[test]
    fn unknown_status_is_kept() {
        let body = br#"{"status": "SOMETHING_NEW"}"#;
        let e = Response::parse(Format::Json, body).unwrap_err();
        assert_eq!(e.kind(),
            &ErrorKind::Api(Status::Other("SOMETHING_NEW".to_string())));
    }

    #[test]
    fn malformed_bodies() {
        let e = Response::parse(Format::Json, b"<html>").unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::ResponseFormat);
        let e = Response::parse(Format::Xml, b"{\"status\": \"OK\"}")
            .unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::ResponseFormat);
        let e = Response::parse(Format::Json, b"{\"results\": []}")
            .unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::ResponseFormat);
    }

    #[test]
    fn status_codes() {
        for code in &["OK", "ZERO_RESULTS", "INVALID_REQUEST", "UNKNOWN_ERROR",
            "MAX_WAYPOINTS_EXCEEDED"]
        {
            assert_eq!(Status::from_code(code).code(), *code);
        }
        assert!(!Status::UnknownError.is_success());
    }
}
