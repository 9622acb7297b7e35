use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::io;
use std::result;

/// Reasons a request could not be built from the command line arguments.
#[derive(Debug)]
pub enum InvalidRequestKind {
    /// The URL could not be parsed.
    Url {
        /// The URL as it was given.
        url: String,
        /// Why parsing failed.
        source: url::ParseError,
    },
    /// The URL scheme is neither `http` nor `https`.
    UnsupportedScheme(String),
    /// A header name is not a valid HTTP token.
    HeaderName(String),
    /// A header value contains bytes that are not allowed in HTTP headers.
    HeaderValue(String),
    /// The HTTP client refused to build the request.
    Client(attohttpc::Error),
}

impl Display for InvalidRequestKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidRequestKind::Url { url, source } => write!(f, "invalid url {:?}: {}", url, source),
            InvalidRequestKind::UnsupportedScheme(scheme) => write!(f, "unsupported protocol scheme {:?}", scheme),
            InvalidRequestKind::HeaderName(name) => write!(f, "invalid header name {:?}", name),
            InvalidRequestKind::HeaderValue(name) => write!(f, "invalid value for header {:?}", name),
            InvalidRequestKind::Client(err) => write!(f, "{}", err),
        }
    }
}

/// Every failure is fatal for the invocation; none of them is retried.
#[derive(Debug)]
pub enum ErrorKind {
    /// The command line is incomplete or malformed, e.g. a required flag is absent.
    MissingArgument(clap::Error),
    /// The request could not be built.
    RequestConstruction(InvalidRequestKind),
    /// Sending the request or receiving the response head failed.
    Network(attohttpc::Error),
    /// The response body could not be read to completion.
    BodyRead(attohttpc::Error),
    /// Writing to the output failed.
    Output(io::Error),
}

/// A type that contains all the errors that can occur during one invocation.
#[derive(Debug)]
pub struct Error(pub(crate) Box<ErrorKind>);

impl Error {
    /// Get a reference to the `ErrorKind` inside.
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Consume this `Error` and get the `ErrorKind` inside.
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            ErrorKind::MissingArgument(err) => write!(f, "{}", err.kind()),
            ErrorKind::RequestConstruction(kind) => write!(f, "error making http request: {}", kind),
            ErrorKind::Network(err) => write!(f, "error making http request: {}", err),
            ErrorKind::BodyRead(err) => write!(f, "error reading response body: {}", err),
            ErrorKind::Output(err) => write!(f, "error writing output: {}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.kind() {
            ErrorKind::MissingArgument(err) => Some(err),
            ErrorKind::RequestConstruction(InvalidRequestKind::Url { source, .. }) => Some(source),
            ErrorKind::RequestConstruction(InvalidRequestKind::Client(err)) => Some(err),
            ErrorKind::RequestConstruction(_) => None,
            ErrorKind::Network(err) | ErrorKind::BodyRead(err) => Some(err),
            ErrorKind::Output(err) => Some(err),
        }
    }
}

macro_rules! impl_from {
    ($t:ty, $i:ident) => {
        impl From<$t> for Error {
            fn from(err: $t) -> Error {
                Error(Box::new(ErrorKind::$i(err)))
            }
        }
    };
}

impl_from!(clap::Error, MissingArgument);
impl_from!(InvalidRequestKind, RequestConstruction);
impl_from!(io::Error, Output);

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }
}

/// Wrapper for the `Result` type with an `Error`.
pub type Result<T = ()> = result::Result<T, Error>;

#[cfg(test)]
mod test {
    use std::error::Error as _;
    use std::io;

    use super::{Error, ErrorKind, InvalidRequestKind};

    #[test]
    fn test_request_construction_message() {
        let source = url::Url::parse("nope").unwrap_err();
        let err: Error = InvalidRequestKind::Url {
            url: "nope".into(),
            source,
        }
        .into();

        assert_eq!(
            err.to_string(),
            format!("error making http request: invalid url \"nope\": {}", source)
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_header_errors_have_no_source() {
        let err: Error = InvalidRequestKind::HeaderName("bad name".into()).into();
        assert_eq!(err.to_string(), "error making http request: invalid header name \"bad name\"");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_unsupported_scheme_message() {
        let err: Error = InvalidRequestKind::UnsupportedScheme("ftp".into()).into();
        assert_eq!(err.to_string(), "error making http request: unsupported protocol scheme \"ftp\"");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_error_is_output() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        match err.into_kind() {
            ErrorKind::Output(err) => assert_eq!(err.kind(), io::ErrorKind::BrokenPipe),
            kind => panic!("unexpected error kind: {:?}", kind),
        }
    }
}
