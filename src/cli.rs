use std::ffi::OsString;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::request::{RequestSpec, Verb};

/// Launch HTTP command to a server
#[derive(Debug, Parser)]
#[command(name = "restlauncher", version, subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse the command line.
    ///
    /// `Ok(None)` means clap already printed help or version information and there
    /// is nothing left to do.
    pub fn try_parse_args<I, T>(args: I) -> Result<Option<Cli>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Cli::try_parse_from(args) {
            Ok(cli) => Ok(Some(cli)),
            Err(err) if !err.use_stderr() => {
                err.print()?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// One subcommand per verb.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch HTTP GET command on url
    #[command(name = "GET", alias = "get")]
    Get(UrlArgs),
    /// Launch HTTP POST command on url
    #[command(name = "POST", alias = "post")]
    Post(ContentArgs),
    /// Launch HTTP PUT command on url
    #[command(name = "PUT", alias = "put")]
    Put(ContentArgs),
    /// Launch HTTP PATCH command on url
    #[command(name = "PATCH", alias = "patch")]
    Patch(ContentArgs),
    /// Launch HTTP DELETE command on url
    #[command(name = "DELETE", alias = "delete")]
    Delete(DeleteArgs),
    /// Launch HTTP HEAD command on url
    #[command(name = "HEAD", alias = "head")]
    Head(UrlArgs),
    /// Launch HTTP OPTIONS command on url
    #[command(name = "OPTIONS", alias = "options")]
    Options(UrlArgs),
}

#[derive(Debug, Clone, Args)]
pub struct UrlArgs {
    /// Url to send the request to
    #[arg(short, long)]
    pub url: String,

    /// Header to set, repeatable; a repeated key keeps its last value
    #[arg(short = 'H', value_name = "KEY=VALUE", value_parser = parse_header)]
    pub header: Vec<(String, String)>,
}

#[derive(Debug, Clone, Args)]
pub struct ContentArgs {
    #[command(flatten)]
    pub target: UrlArgs,

    /// Request body
    #[arg(short, long)]
    pub content: String,
}

#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: UrlArgs,

    /// Request body, omitted when empty
    #[arg(short, long)]
    pub content: Option<String>,
}

/// Split `key=value` at the first `=`.
fn parse_header(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{}`", s))?;
    Ok((key.to_owned(), value.to_owned()))
}

impl Command {
    pub fn verb(&self) -> Verb {
        match self {
            Command::Get(_) => Verb::Get,
            Command::Post(_) => Verb::Post,
            Command::Put(_) => Verb::Put,
            Command::Patch(_) => Verb::Patch,
            Command::Delete(_) => Verb::Delete,
            Command::Head(_) => Verb::Head,
            Command::Options(_) => Verb::Options,
        }
    }

    /// Turn the parsed arguments into the request to send.
    pub fn into_request_spec(self) -> Result<RequestSpec> {
        let verb = self.verb();
        let (target, body) = match self {
            Command::Get(target) | Command::Head(target) | Command::Options(target) => (target, None),
            Command::Post(args) | Command::Put(args) | Command::Patch(args) => {
                (args.target, Some(args.content.into_bytes()))
            }
            Command::Delete(args) => {
                let body = args.content.filter(|c| !c.is_empty()).map(String::into_bytes);
                (args.target, body)
            }
        };
        RequestSpec::new(verb, target.url, target.header, body)
    }
}
