// Copyright (C) 2018 Stephane Raux. Distributed under the MIT license.

use crate::request::non_empty;
use crate::{Error, ErrorKind, GeocodeRequest, ServiceKind, UrlSigner};
use log::trace;
use url::form_urlencoded;

pub const URL_DOMAIN: &str = "maps.googleapis.com";

type Pairs = Vec<(&'static str, String)>;

fn push_opt(pairs: &mut Pairs, key: &'static str, value: &Option<String>) {
    if let Some(v) = value {
        pairs.push((key, v.clone()));
    }
}

fn push_sensor(pairs: &mut Pairs, request: &GeocodeRequest) {
    if let Some(sensor) = request.sensor {
        pairs.push(("sensor", sensor.to_string()));
    }
}

fn geocode_params(request: &GeocodeRequest) -> Pairs {
    let mut pairs = Pairs::new();
    // Address wins when both are set.
    if let Some(address) = non_empty(&request.address) {
        pairs.push(("address", address.to_string()));
    } else if let Some(c) = request.get_latitude_longitude() {
        pairs.push(("latlng", format!("{},{}", c.latitude, c.longitude)));
    }
    if let Some((sw, ne)) = request.get_bounds() {
        pairs.push(("bounds", format!("{},{}|{},{}", sw.latitude,
            sw.longitude, ne.latitude, ne.longitude)));
    }
    push_opt(&mut pairs, "region", &request.region);
    push_opt(&mut pairs, "language", &request.language);
    pairs.push(("result_type", request.result_types.join("|")));
    let location_types = request.location_types.iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>();
    pairs.push(("location_type", location_types.join("|")));
    push_sensor(&mut pairs, request);
    pairs
}

fn directions_params(request: &GeocodeRequest) -> Pairs {
    let mut pairs = Pairs::new();
    push_opt(&mut pairs, "origin", &request.origin);
    push_opt(&mut pairs, "destination", &request.destination);
    push_opt(&mut pairs, "language", &request.language);
    push_sensor(&mut pairs, request);
    pairs
}

impl GeocodeRequest {
    /// Ordered query parameters, without the signature.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = match self.service {
            ServiceKind::Geocode => geocode_params(self),
            ServiceKind::Directions => directions_params(self),
        };
        pairs.retain(|(_, v)| !v.is_empty());
        // The signature is appended later, over the path and query string.
        if let Some((client, _)) = self.business_credentials() {
            pairs.push(("client", client.to_string()));
        } else if let Some(key) = self.get_api_key() {
            pairs.push(("key", key.to_string()));
        }
        pairs
    }

    /// Form-encoded query string. A request without any location simply
    /// lacks the corresponding parameter.
    pub fn query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.query_pairs() {
            query.append_pair(k, &v);
        }
        query.finish()
    }

    pub fn has_location(&self) -> bool {
        match self.service {
            ServiceKind::Geocode => non_empty(&self.address).is_some()
                || self.get_latitude_longitude().is_some(),
            ServiceKind::Directions => non_empty(&self.origin).is_some()
                && non_empty(&self.destination).is_some(),
        }
    }

    /// Path and query string, signed for business clients.
    pub fn path_and_query(&self) -> Result<String, Error> {
        if !self.has_location() {
            return Err(ErrorKind::MissingLocation.into())
        }
        let mut path = format!("/maps/api/{}/{}?{}", self.service, self.format,
            self.query_string());
        if let Some((_, key)) = self.business_credentials() {
            let signature = UrlSigner::new(key)?.sign(&path);
            path.push_str("&signature=");
            path.push_str(&signature);
        }
        Ok(path)
    }

    /// Full request URL. HTTPS is used when `https` is set or an API key is
    /// present.
    pub fn build_url(&self, https: bool) -> Result<String, Error> {
        let scheme = if https || self.get_api_key().is_some() {
            "https"
        } else {
            "http"
        };
        let path = self.path_and_query()?;
        trace!("Built {} request over {}", self.service, scheme);
        Ok(format!("{}://{}{}", scheme, URL_DOMAIN, path))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Format, GeocodeRequest, LocationType};
    use crate::request::result_type;

    #[test]
    fn address_wins_over_latlng() {
        let r = GeocodeRequest::geocode("Paris").latitude_longitude(1.5, 2.5);
        assert_eq!(r.query_string(), "address=Paris");
    }

    #[test]
    fn latlng_without_address() {
        let r = GeocodeRequest::reverse(40.714224, -73.961452);
        assert_eq!(r.query_string(), "latlng=40.714224%2C-73.961452");
        let r = r.address("");
        assert_eq!(r.query_string(), "latlng=40.714224%2C-73.961452");
    }

    #[test]
    fn no_location_is_omitted() {
        let r = GeocodeRequest::default().region("us").latitude(1.0);
        assert_eq!(r.query_string(), "region=us");
        assert!(!r.has_location());
    }

    #[test]
    fn bounds_need_both_corners() {
        let r = GeocodeRequest::geocode("x").bounds_southwest(34.17, -118.60);
        assert_eq!(r.query_string(), "address=x");
        let r = r.bounds_northeast(34.24, -118.50);
        assert_eq!(r.query_string(),
            "address=x&bounds=34.17%2C-118.6%7C34.24%2C-118.5");
    }

    #[test]
    fn parameter_order() {
        let r = GeocodeRequest::geocode("1600 Amphitheatre Parkway")
            .api_key("KEY")
            .sensor(false)
            .location_types(vec![LocationType::Rooftop,
                LocationType::Approximate])
            .result_types(vec![result_type::STREET_ADDRESS,
                result_type::ROUTE])
            .language("fr")
            .region("es")
            .bounds(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r.query_string(), "address=1600+Amphitheatre+Parkway\
            &bounds=1%2C2%7C3%2C4&region=es&language=fr\
            &result_type=street_address%7Croute\
            &location_type=ROOFTOP%7CAPPROXIMATE&sensor=false&key=KEY");
    }

    #[test]
    fn empty_values_are_dropped() {
        let r = GeocodeRequest::geocode("x").region("").language("")
            .result_types(Vec::<String>::new());
        assert_eq!(r.query_string(), "address=x");
    }

    #[test]
    fn sensor_is_literal() {
        let r = GeocodeRequest::geocode("x").sensor(true);
        assert_eq!(r.query_string(), "address=x&sensor=true");
    }

    #[test]
    fn directions_params() {
        let r = GeocodeRequest::directions("Boston, MA", "Concord, MA")
            .language("en")
            .region("us")
            .format(Format::Xml);
        assert_eq!(r.query_string(),
            "origin=Boston%2C+MA&destination=Concord%2C+MA&language=en");
        assert_eq!(r.build_url(false).unwrap(),
            "http://maps.googleapis.com/maps/api/directions/xml?\
            origin=Boston%2C+MA&destination=Concord%2C+MA&language=en");
    }

    #[test]
    fn business_client_ignores_api_key() {
        let r = GeocodeRequest::geocode("x")
            .api_key("KEY")
            .client_id("gme-test")
            .signing_key("vNIXE0xscrmjlyV-12Nj_BvUPaw=");
        assert_eq!(r.query_string(), "address=x&client=gme-test");
        let url = r.build_url(false).unwrap();
        assert!(url.starts_with("https://"));
        assert!(!url.contains("&key="));
        assert!(url.contains("&signature="));
    }

    #[test]
    fn build_url_is_repeatable() {
        let r = GeocodeRequest::geocode("x")
            .client_id("gme-test")
            .signing_key("vNIXE0xscrmjlyV-12Nj_BvUPaw=");
        assert_eq!(r.build_url(true).unwrap(), r.build_url(true).unwrap());
    }
}
