use std::fmt::{self, Display};

use attohttpc::{PreparedRequest, RequestBuilder, Response};
use http::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Method,
};
use url::Url;

use crate::error::{Error, ErrorKind, InvalidRequestKind, Result};

mod body;

pub use body::Payload;

/// The HTTP methods that can be launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Verb {
    /// Every supported verb, in the order they are listed by `--help`.
    pub const ALL: [Verb; 7] = [
        Verb::Get,
        Verb::Post,
        Verb::Put,
        Verb::Patch,
        Verb::Delete,
        Verb::Head,
        Verb::Options,
    ];

    /// The method sent on the request line.
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
            Verb::Head => Method::HEAD,
            Verb::Options => Method::OPTIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Head => "HEAD",
            Verb::Options => "OPTIONS",
        }
    }

    /// Whether a request with this verb may carry a body.
    pub fn takes_body(self) -> bool {
        matches!(self, Verb::Post | Verb::Put | Verb::Patch | Verb::Delete)
    }

    /// Whether the response body is printed after the headers.
    pub fn prints_body(self) -> bool {
        !matches!(self, Verb::Head | Verb::Options)
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn header_insert(headers: &mut HeaderMap, key: &str, value: &str) -> Result {
    let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| InvalidRequestKind::HeaderName(key.to_owned()))?;
    let value = HeaderValue::from_str(value).map_err(|_| InvalidRequestKind::HeaderValue(key.to_owned()))?;
    headers.insert(name, value);
    Ok(())
}

/// Everything needed to send the one request of an invocation.
///
/// A `RequestSpec` is immutable once built. Header names are case-insensitive and a
/// name given more than once keeps its last value.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    verb: Verb,
    url: String,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl RequestSpec {
    /// Build a `RequestSpec`, validating header names and values.
    ///
    /// The URL is kept as given; it is only parsed when the request is prepared.
    /// A body given for a verb that does not take one is dropped.
    pub fn new<U, I, K, V>(verb: Verb, url: U, headers: I, body: Option<Vec<u8>>) -> Result<RequestSpec>
    where
        U: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = HeaderMap::new();
        for (key, value) in headers {
            header_insert(&mut map, key.as_ref(), value.as_ref())?;
        }

        if body.is_some() && !verb.takes_body() {
            trace!("dropping body for {} request", verb);
        }

        Ok(RequestSpec {
            verb,
            url: url.into(),
            headers: map,
            body: body.filter(|_| verb.takes_body()),
        })
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The request body, `None` when no body is sent at all.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Build the request without sending it.
    ///
    /// The user's headers replace any default header the client would send under
    /// the same name.
    pub fn prepare(&self) -> Result<PreparedRequest<Payload<'_>>> {
        let url = Url::parse(&self.url).map_err(|source| InvalidRequestKind::Url {
            url: self.url.clone(),
            source,
        })?;
        check_target(&url)?;

        let mut builder = RequestBuilder::try_new(self.verb.method(), url).map_err(InvalidRequestKind::Client)?;
        for (name, value) in self.headers.iter() {
            builder = builder
                .try_header(name.clone(), value.as_bytes())
                .map_err(InvalidRequestKind::Client)?;
        }

        let prepared = builder
            .body(Payload(self.body()))
            .try_prepare()
            .map_err(InvalidRequestKind::Client)?;
        Ok(prepared)
    }

    /// Send the request and wait for the response head.
    ///
    /// The body of the returned `Response` has not been read yet.
    pub fn execute(&self) -> Result<Response> {
        let mut request = self.prepare()?;

        debug!("sending {} {}", request.method(), request.url());
        if let Some(body) = self.body() {
            debug!("with a body of {} bytes", body.len());
        }

        let response = request.send().map_err(send_error)?;
        debug!("received status {}", response.status());

        Ok(response)
    }
}

/// Reject URLs the client could only fail on once it tries to connect.
///
/// `url` already refuses `http` and `https` URLs without a host, and knows their
/// default ports, so the scheme is all that is left to check.
fn check_target(url: &Url) -> Result {
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(InvalidRequestKind::UnsupportedScheme(scheme.to_owned()).into()),
    }
}

/// Once the request is on its way every failure is the network's, including
/// redirects to places the client cannot follow.
fn send_error(err: attohttpc::Error) -> Error {
    ErrorKind::Network(err).into()
}
