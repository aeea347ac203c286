// Copyright (C) 2018 Stephane Raux. Distributed under the MIT license.

use crate::{BoundingBox, Coordinates, Format};
use std::fmt::{Display, self};

/// Web service a request is addressed to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ServiceKind {
    Geocode,
    Directions,
}

impl ServiceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKind::Geocode => "geocode",
            ServiceKind::Directions => "directions",
        }
    }
}

impl Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Precision of a geocoded location, usable as a `location_type` filter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LocationType {
    Rooftop,
    RangeInterpolated,
    GeometricCenter,
    Approximate,
}

impl LocationType {
    pub fn as_str(self) -> &'static str {
        match self {
            LocationType::Rooftop => "ROOFTOP",
            LocationType::RangeInterpolated => "RANGE_INTERPOLATED",
            LocationType::GeometricCenter => "GEOMETRIC_CENTER",
            LocationType::Approximate => "APPROXIMATE",
        }
    }
}

/// Address types accepted by the `result_type` filter.
pub mod result_type {
    pub const STREET_ADDRESS: &str = "street_address";
    pub const ROUTE: &str = "route";
    pub const INTERSECTION: &str = "intersection";
    pub const POLITICAL: &str = "political";
    pub const COUNTRY: &str = "country";
    pub const ADMIN_AREA_1: &str = "administrative_area_level_1";
    pub const ADMIN_AREA_2: &str = "administrative_area_level_2";
    pub const ADMIN_AREA_3: &str = "administrative_area_level_3";
    pub const COLLOQUIAL_AREA: &str = "colloquial_area";
    pub const LOCALITY: &str = "locality";
    pub const SUB_LOCALITY: &str = "sublocality";
    pub const NEIGHBORHOOD: &str = "neighborhood";
    pub const PREMISE: &str = "premise";
    pub const SUB_PREMISE: &str = "subpremise";
    pub const POSTAL_CODE: &str = "postal_code";
    pub const NATURAL_FEATURE: &str = "natural_feature";
    pub const AIRPORT: &str = "airport";
    pub const PARK: &str = "park";
    pub const POINT_OF_INTEREST: &str = "point_of_interest";
    pub const POST_BOX: &str = "post_box";
    pub const STREET_NUMBER: &str = "street_number";
    pub const FLOOR: &str = "floor";
    pub const ROOM: &str = "room";
}

/// Parameters of one geocoding, reverse geocoding or directions lookup.
///
/// Setters consume and return the request so they can be chained. Empty
/// strings are treated as unset when the URL is built.
#[derive(Clone, Debug, PartialEq)]
pub struct GeocodeRequest {
    pub(crate) service: ServiceKind,
    pub(crate) format: Format,
    pub(crate) address: Option<String>,
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
    pub(crate) bounds_southwest: Option<Coordinates>,
    pub(crate) bounds_northeast: Option<Coordinates>,
    pub(crate) region: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) result_types: Vec<String>,
    pub(crate) location_types: Vec<LocationType>,
    pub(crate) origin: Option<String>,
    pub(crate) destination: Option<String>,
    pub(crate) sensor: Option<bool>,
    pub(crate) api_key: Option<String>,
    pub(crate) client_id: Option<String>,
    pub(crate) signing_key: Option<String>,
}

impl Default for GeocodeRequest {
    fn default() -> Self {
        GeocodeRequest::new(ServiceKind::Geocode)
    }
}

impl GeocodeRequest {
    pub fn new(service: ServiceKind) -> Self {
        GeocodeRequest {
            service,
            format: Format::default(),
            address: None,
            latitude: None,
            longitude: None,
            bounds_southwest: None,
            bounds_northeast: None,
            region: None,
            language: None,
            result_types: Vec::new(),
            location_types: Vec::new(),
            origin: None,
            destination: None,
            sensor: None,
            api_key: None,
            client_id: None,
            signing_key: None,
        }
    }

    /// Forward geocoding of `address`.
    pub fn geocode<S: Into<String>>(address: S) -> Self {
        GeocodeRequest::default().address(address)
    }

    /// Reverse geocoding of a point.
    pub fn reverse(latitude: f64, longitude: f64) -> Self {
        GeocodeRequest::default().latitude_longitude(latitude, longitude)
    }

    pub fn directions<S, T>(origin: S, destination: T) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        GeocodeRequest::new(ServiceKind::Directions)
            .origin(origin)
            .destination(destination)
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn address<S: Into<String>>(mut self, address: S) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    pub fn longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    pub fn latitude_longitude(self, latitude: f64, longitude: f64) -> Self {
        self.latitude(latitude).longitude(longitude)
    }

    pub fn bounds(self, southwest_latitude: f64, southwest_longitude: f64,
        northeast_latitude: f64, northeast_longitude: f64) -> Self
    {
        self.bounds_southwest(southwest_latitude, southwest_longitude)
            .bounds_northeast(northeast_latitude, northeast_longitude)
    }

    pub fn bounds_southwest(mut self, latitude: f64, longitude: f64) -> Self {
        self.bounds_southwest = Some(Coordinates {latitude, longitude});
        self
    }

    pub fn bounds_northeast(mut self, latitude: f64, longitude: f64) -> Self {
        self.bounds_northeast = Some(Coordinates {latitude, longitude});
        self
    }

    /// Biases results toward the area covered by `b`.
    pub fn bounding_box(mut self, b: &BoundingBox) -> Self {
        self.bounds_southwest = Some(b.southwest());
        self.bounds_northeast = Some(b.northeast());
        self
    }

    pub fn region<S: Into<String>>(mut self, region: S) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn result_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.result_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn location_types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = LocationType>,
    {
        self.location_types = types.into_iter().collect();
        self
    }

    pub fn origin<S: Into<String>>(mut self, origin: S) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn destination<S: Into<String>>(mut self, destination: S) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Legacy parameter, only sent when set.
    pub fn sensor(mut self, sensor: bool) -> Self {
        self.sensor = Some(sensor);
        self
    }

    pub fn api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn client_id<S: Into<String>>(mut self, id: S) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// URL-safe Base64 key used to sign business client requests.
    pub fn signing_key<S: Into<String>>(mut self, key: S) -> Self {
        self.signing_key = Some(key.into());
        self
    }

    pub fn get_service(&self) -> ServiceKind {self.service}

    pub fn get_format(&self) -> Format {self.format}

    pub fn get_address(&self) -> Option<&str> {
        self.address.as_ref().map(String::as_str)
    }

    pub fn get_latitude(&self) -> Option<f64> {self.latitude}

    pub fn get_longitude(&self) -> Option<f64> {self.longitude}

    /// Coordinates to reverse geocode, if both halves are set.
    pub fn get_latitude_longitude(&self) -> Option<Coordinates> {
        self.latitude.and_then(|latitude| {
            self.longitude.map(|longitude| Coordinates {latitude, longitude})
        })
    }

    /// Southwest and northeast corners, if both are set.
    pub fn get_bounds(&self) -> Option<(Coordinates, Coordinates)> {
        self.bounds_southwest.and_then(|sw| {
            self.bounds_northeast.map(|ne| (sw, ne))
        })
    }

    pub fn get_region(&self) -> Option<&str> {
        self.region.as_ref().map(String::as_str)
    }

    pub fn get_language(&self) -> Option<&str> {
        self.language.as_ref().map(String::as_str)
    }

    pub fn get_result_types(&self) -> &[String] {&self.result_types}

    pub fn get_location_types(&self) -> &[LocationType] {&self.location_types}

    pub fn get_origin(&self) -> Option<&str> {
        self.origin.as_ref().map(String::as_str)
    }

    pub fn get_destination(&self) -> Option<&str> {
        self.destination.as_ref().map(String::as_str)
    }

    pub fn get_sensor(&self) -> Option<bool> {self.sensor}

    pub fn get_api_key(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    pub fn get_client_id(&self) -> Option<&str> {
        self.client_id.as_ref().map(String::as_str)
    }

    pub fn get_signing_key(&self) -> Option<&str> {
        self.signing_key.as_ref().map(String::as_str)
    }

    /// Client ID and signing key, when both are set and non-empty.
    pub fn business_credentials(&self) -> Option<(&str, &str)> {
        non_empty(&self.client_id).and_then(|id| {
            non_empty(&self.signing_key).map(|key| (id, key))
        })
    }

    pub fn is_business_client(&self) -> bool {
        self.business_credentials().is_some()
    }
}

pub(crate) fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_ref().map(String::as_str).filter(|s| !s.is_empty())
}
