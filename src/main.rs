// Copyright (C) 2018 Stephane Raux. Distributed under the MIT license.

#![deny(warnings)]

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use futures::Future;
use google_geocode::{BoundingBox, Client, Config, Format, GeocodeRequest};
use std::error::Error;
use std::fmt::{Display, self};
use std::fs::File;
use std::io::{self, Write};
use std::num::ParseFloatError;
use std::path::Path;
use std::sync::{Arc, Mutex};

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

fn number(name: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name).required(true).allow_hyphen_values(true)
}

fn app() -> App<'static, 'static> {
    App::new(APP_NAME)
        .version(APP_VERSION)
        .author(APP_AUTHORS)
        .about("Google Maps geocoding client")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("CONFIG")
                .short("c")
                .long("config")
                .takes_value(true)
                .global(true)
                .help("Path to configuration file")
        )
        .arg(
            Arg::with_name("KEY")
                .short("k")
                .long("key")
                .takes_value(true)
                .global(true)
                .help("API key")
        )
        .arg(
            Arg::with_name("FORMAT")
                .short("f")
                .long("format")
                .takes_value(true)
                .possible_values(&["json", "xml"])
                .global(true)
                .help("Response format (default: json)")
        )
        .arg(
            Arg::with_name("LANGUAGE")
                .short("l")
                .long("language")
                .takes_value(true)
                .global(true)
                .help("Language of the results")
        )
        .arg(
            Arg::with_name("REGION")
                .short("r")
                .long("region")
                .takes_value(true)
                .global(true)
                .help("Region code (ccTLD) to bias results toward")
        )
        .arg(
            Arg::with_name("HTTPS")
                .long("https")
                .global(true)
                .help("Send the request over HTTPS")
        )
        .arg(
            Arg::with_name("RAW")
                .long("raw")
                .global(true)
                .help("Print the response body as received")
        )
        .arg(
            Arg::with_name("URL")
                .long("url")
                .global(true)
                .help("Print the request URL instead of sending it")
        )
        .subcommand(
            SubCommand::with_name("address")
                .about("Geocode an address")
                .arg(Arg::with_name("ADDRESS").required(true))
        )
        .subcommand(
            SubCommand::with_name("reverse")
                .about("Look up the address of a point")
                .arg(number("LAT"))
                .arg(number("LON"))
        )
        .subcommand(
            SubCommand::with_name("directions")
                .about("Get directions between two places")
                .arg(Arg::with_name("ORIGIN").required(true))
                .arg(Arg::with_name("DESTINATION").required(true))
        )
        .subcommand(
            SubCommand::with_name("bbox")
                .about("Print the box spanning MILES around a point")
                .arg(number("LAT"))
                .arg(number("LON"))
                .arg(number("MILES"))
        )
}

fn parse_number(m: &ArgMatches, name: &str) -> Result<f64, AppError> {
    m.value_of(name).unwrap_or("").parse().map_err(AppError::BadNumber)
}

fn run() -> Result<(), AppError> {
    let matches = app().get_matches();
    let (name, sub) = matches.subcommand();
    let sub = match sub {
        Some(sub) => sub,
        None => return Ok(()),
    };
    let request = match name {
        "address" => GeocodeRequest::geocode(sub.value_of("ADDRESS")
            .unwrap_or("")),
        "reverse" => GeocodeRequest::reverse(parse_number(sub, "LAT")?,
            parse_number(sub, "LON")?),
        "directions" => GeocodeRequest::directions(
            sub.value_of("ORIGIN").unwrap_or(""),
            sub.value_of("DESTINATION").unwrap_or("")),
        "bbox" => {
            let b = BoundingBox::around(parse_number(sub, "LAT")?,
                parse_number(sub, "LON")?, parse_number(sub, "MILES")?);
            return print_json(&b)
        }
        _ => return Ok(()),
    };
    let config = match sub.value_of("CONFIG") {
        Some(path) => {
            let config_file = File::open(Path::new(path))
                .map_err(AppError::FailedToOpenConfigFile)?;
            Config::from_config(config_file)
                .map_err(AppError::BadConfigFile)?
        }
        None => Config::default(),
    };
    let mut request = config.apply(request);
    if let Some(key) = sub.value_of("KEY") {
        request = request.api_key(key);
    }
    if let Some(language) = sub.value_of("LANGUAGE") {
        request = request.language(language);
    }
    if let Some(region) = sub.value_of("REGION") {
        request = request.region(region);
    }
    match sub.value_of("FORMAT") {
        Some("xml") => request = request.format(Format::Xml),
        Some("json") => request = request.format(Format::Json),
        _ => {}
    }
    let https = config.https || sub.is_present("HTTPS");
    if sub.is_present("URL") {
        let url = request.build_url(https).map_err(AppError::Request)?;
        println!("{}", url);
        return Ok(())
    }
    let client = Client::new().map_err(AppError::Request)?;
    if sub.is_present("RAW") {
        let body = block_on(futures::future::lazy(move || {
            client.fetch(&request, https)
        })).map_err(AppError::Request)?;
        return io::stdout().write_all(&body).map_err(AppError::Output)
    }
    let response = block_on(futures::future::lazy(move || {
        client.geocode(&request, https)
    })).map_err(AppError::Request)?;
    match response {
        google_geocode::Response::Json(obj) => print_json(&obj),
        google_geocode::Response::Xml(root) => {
            root.write(io::stdout())
                .map_err(|e| AppError::Output(
                    io::Error::new(io::ErrorKind::Other, e.to_string())))?;
            println!();
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let s = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Output(e.into()))?;
    println!("{}", s);
    Ok(())
}

fn block_on<F>(f: F) -> Result<F::Item, F::Error>
where
    F: Future + Send + 'static,
    F::Item: Send + 'static,
    F::Error: Send + 'static,
{
    let result = Arc::new(Mutex::new(None));
    hyper::rt::run({
        let res = result.clone();
        f.then(move |r| {
            *res.lock().unwrap() = Some(r);
            Ok::<(), ()>(())
        })
    });
    let result = result.lock().unwrap().take();
    result.expect("Runtime stopped before the request completed")
}

fn main() {
    env_logger::init();
    let code = if let Err(e) = run() {
        print_error(e);
        1
    } else {
        0
    };
    std::process::exit(code)
}

fn print_error(e: AppError) {
    eprintln!("Error: {}", e);
    let mut e: &dyn Error = &e;
    while let Some(cause) = e.source() {
        eprintln!("Because: {}", cause);
        e = cause;
    }
}

#[derive(Debug)]
enum AppError {
    BadConfigFile(serde_json::Error),
    BadNumber(ParseFloatError),
    FailedToOpenConfigFile(io::Error),
    Output(io::Error),
    Request(google_geocode::Error),
}

impl Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadConfigFile(_) => f.write_str("Bad configuration file"),
            AppError::BadNumber(_) => f.write_str("Bad number"),
            AppError::FailedToOpenConfigFile(_) =>
                f.write_str("Failed to open configuration file"),
            AppError::Output(_) => f.write_str("Failed to write output"),
            AppError::Request(_) => f.write_str("Request failed"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::BadConfigFile(e) => Some(e),
            AppError::BadNumber(e) => Some(e),
            AppError::FailedToOpenConfigFile(e) => Some(e),
            AppError::Output(e) => Some(e),
            AppError::Request(e) => Some(e),
        }
    }
}
