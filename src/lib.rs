//! `restlauncher` sends a single HTTP request described on the command line and prints
//! the response status, headers and body.
//!
//! The HTTP work itself is done by [`attohttpc`]; this crate maps the command line to a
//! [`RequestSpec`], sends it, and formats the [`attohttpc::Response`].
//!
//! ```no_run
//! # fn main() -> restlauncher::Result {
//! let spec = restlauncher::RequestSpec::new(
//!     restlauncher::Verb::Get,
//!     "http://example.com",
//!     [("Accept", "text/plain")],
//!     None,
//! )?;
//! let response = spec.execute()?;
//! restlauncher::output::print_response(spec.verb(), response, std::io::stdout())?;
//! # Ok(())
//! # }
//! ```
#![deny(missing_debug_implementations)]

#[macro_use]
extern crate log;

use std::io::Write;

pub mod cli;
mod error;
pub mod output;
pub mod request;

pub use crate::cli::{Cli, Command};
pub use crate::error::{Error, ErrorKind, InvalidRequestKind, Result};
pub use crate::request::{Payload, RequestSpec, Verb};

/// Send the request described by `command` and print its response to `writer`.
pub fn run<W>(command: Command, writer: W) -> Result
where
    W: Write,
{
    let spec = command.into_request_spec()?;
    let response = spec.execute()?;
    output::print_response(spec.verb(), response, writer)
}
