use std::borrow::Cow;
use std::io::{self, Write};

use attohttpc::Response;
use http::{
    header::{CONTENT_ENCODING, CONTENT_LENGTH},
    HeaderMap, StatusCode,
};

use crate::error::{ErrorKind, Result};
use crate::request::Verb;

/// Format the status as `200 OK`, or only the code when it has no canonical reason.
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Canonical MIME form of a header name, `content-type` becomes `Content-Type`.
pub fn canonical_name(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

/// Write one `Name: [v1 v2]` line per header name, sorted by name.
pub fn write_headers<W>(mut writer: W, headers: &HeaderMap) -> Result
where
    W: Write,
{
    let mut names: Vec<_> = headers.keys().map(|name| (canonical_name(name.as_str()), name)).collect();
    names.sort_by(|a, b| a.0.cmp(&b.0));

    for (canonical, name) in names {
        let values: Vec<Cow<str>> = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect();
        writeln!(writer, "{}: [{}]", canonical, values.join(" "))?;
    }
    Ok(())
}

/// Write the status line followed by the headers.
pub fn write_head<W>(mut writer: W, status: StatusCode, headers: &HeaderMap) -> Result
where
    W: Write,
{
    writeln!(writer, "{}", status_line(status))?;
    write_headers(&mut writer, headers)
}

/// The number of body bytes the server announced, when it can be checked.
///
/// Bodies the client decompresses have a different length than the one announced,
/// and some statuses never carry a body whatever their headers say.
pub fn announced_length(status: StatusCode, headers: &HeaderMap) -> Option<u64> {
    if status.is_informational() || status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED {
        return None;
    }
    if headers.contains_key(CONTENT_ENCODING) {
        return None;
    }

    let mut values = headers.get_all(CONTENT_LENGTH).iter();
    match (values.next(), values.next()) {
        (Some(value), None) => value.to_str().ok()?.trim().parse().ok(),
        _ => None,
    }
}

/// Print a response the way `verb` wants it.
///
/// The head is flushed before the body is read, so it stays printed even if
/// reading the body fails. HEAD and OPTIONS responses are dropped unread.
pub fn print_response<W>(verb: Verb, response: Response, mut writer: W) -> Result
where
    W: Write,
{
    write_head(&mut writer, response.status(), response.headers())?;
    let expected = announced_length(response.status(), response.headers());

    if !verb.prints_body() {
        writer.flush()?;
        return Ok(());
    }

    writeln!(writer)?;
    writer.flush()?;

    let body = response.bytes().map_err(ErrorKind::BodyRead)?;
    trace!("read body of {} bytes", body.len());

    // a connection closed early ends a length-delimited body without an error
    if let Some(expected) = expected {
        if (body.len() as u64) < expected {
            debug!("body ended after {} of {} bytes", body.len(), expected);
            let err = attohttpc::Error::from(io::Error::from(io::ErrorKind::UnexpectedEof));
            return Err(ErrorKind::BodyRead(err).into());
        }
    }

    writeln!(writer, "{}", String::from_utf8_lossy(&body))?;
    writer.flush()?;
    Ok(())
}
