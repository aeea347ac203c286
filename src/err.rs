// Copyright (C) 2018 Stephane Raux. Distributed under the MIT license.

use crate::Status;
use std::error::Error as StdError;
use std::fmt::{Display, self};

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    cause: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new<E>(kind: ErrorKind, cause: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        let cause = Some(cause.into());
        Error {kind, cause}
    }

    pub fn kind(&self) -> &ErrorKind {&self.kind}
}

#[derive(Clone, Debug, PartialEq)]
pub enum ErrorKind {
    /// Neither an address nor a complete coordinate pair (or, for
    /// directions, an origin and a destination) was given.
    MissingLocation,
    InvalidSigningKey,
    Transport,
    /// The service answered with a status other than `OK` or `ZERO_RESULTS`.
    Api(Status),
    ResponseFormat,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ErrorKind::MissingLocation => f.write_str("Missing location"),
            ErrorKind::InvalidSigningKey => f.write_str("Invalid signing key"),
            ErrorKind::Transport => f.write_str("Transport failure"),
            ErrorKind::Api(status) => write!(f, "API error: {}", status),
            ErrorKind::ResponseFormat => f.write_str("Malformed response"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(|e| &**e as &dyn StdError)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {kind, cause: None}
    }
}

impl From<hyper::Error> for Error {
    fn from(e: hyper::Error) -> Error {
        Error::new(ErrorKind::Transport, e)
    }
}

impl From<hyper_tls::Error> for Error {
    fn from(e: hyper_tls::Error) -> Error {
        Error::new(ErrorKind::Transport, e)
    }
}
