// Copyright (C) 2018 Stephane Raux. Distributed under the MIT license.

use crate::{Error, ErrorKind, GeocodeRequest, Response};
use futures::future::{self, Either};
use futures::{Future, Stream};
use hyper::client::HttpConnector;
use hyper::Uri;
use hyper_tls::HttpsConnector;
use log::debug;

/// HTTP(S) client for the Google Maps web services.
///
/// One request is sent per call. Failures are reported, never retried.
#[derive(Clone)]
pub struct Client {
    inner: hyper::Client<HttpsConnector<HttpConnector>>,
}

impl Client {
    pub fn new() -> Result<Self, Error> {
        let connector = HttpsConnector::new(1)?;
        let inner = hyper::Client::builder()
            .build::<_, hyper::Body>(connector);
        Ok(Client {inner})
    }

    /// Sends `request` and resolves to the raw response body.
    pub fn fetch(&self, request: &GeocodeRequest, https: bool)
        -> Box<dyn Future<Item = Vec<u8>, Error = Error> + Send>
    {
        let uri = match request.build_url(https) {
            Ok(url) => url.parse::<Uri>(),
            Err(e) => return Box::new(future::err(e)),
        };
        let uri = match uri {
            Ok(uri) => uri,
            Err(e) => return Box::new(future::err(
                Error::new(ErrorKind::Transport, e))),
        };
        debug!("Sending {} request to {}://{}{}", request.get_service(),
            uri.scheme_part().map_or("", |s| s.as_str()),
            uri.host().unwrap_or(""), uri.path());
        let body = self.inner.get(uri)
            .from_err()
            .and_then(|resp| {
                let status = resp.status();
                if !status.is_success() {
                    let e = Error::new(ErrorKind::Transport,
                        format!("HTTP status {}", status));
                    return Either::A(future::err(e))
                }
                Either::B(resp.into_body()
                    .concat2()
                    .from_err()
                    .map(|chunk| chunk.to_vec()))
            });
        Box::new(body)
    }

    /// Sends `request` and parses the body in the request's format.
    pub fn geocode(&self, request: &GeocodeRequest, https: bool)
        -> Box<dyn Future<Item = Response, Error = Error> + Send>
    {
        let format = request.get_format();
        let response = self.fetch(request, https)
            .and_then(move |body| Response::parse(format, &body));
        Box::new(response)
    }
}
