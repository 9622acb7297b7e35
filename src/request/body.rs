use std::io::{Result as IoResult, Write};

use attohttpc::body::{Body, BodyKind};

/// The body of an outgoing request, if it has one.
///
/// `Payload(None)` sends no body at all, while an empty slice sends an
/// empty body with a `Content-Length` of zero. No `Content-Type` is ever implied.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a>(pub Option<&'a [u8]>);

impl Body for Payload<'_> {
    fn kind(&mut self) -> IoResult<BodyKind> {
        match self.0 {
            None => Ok(BodyKind::Empty),
            Some(bytes) => Ok(BodyKind::KnownLength(bytes.len() as u64)),
        }
    }

    fn write<W: Write>(&mut self, mut writer: W) -> IoResult<()> {
        match self.0 {
            None => Ok(()),
            Some(bytes) => writer.write_all(bytes),
        }
    }

    fn content_type(&mut self) -> IoResult<Option<String>> {
        Ok(None)
    }
}
