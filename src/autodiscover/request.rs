use quick_xml::{events::Event, Reader};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub email_address: String,
    pub acceptable_response_schema: String,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("request body is not valid utf-8")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("request body has no root element")]
    MissingRoot,
    #[error("expected root element Autodiscover, found {found}")]
    UnexpectedRoot { found: String },
    #[error("request body ended inside an open element")]
    UnexpectedEof,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    EmailAddress,
    AcceptableResponseSchema,
}

impl Request {
    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::EmailAddress => &mut self.email_address,
            Field::AcceptableResponseSchema => &mut self.acceptable_response_schema,
        }
    }
}

/// Decodes an `Autodiscover > Request` envelope.
///
/// Elements are matched on their local names, so any namespace or prefix is accepted.
/// Missing leaves decode to empty strings. The schema value is not validated here.
/// Reading stops at the end of the root element.
pub fn decode(body: &[u8]) -> Result<Request, DecodeError> {
    let mut reader = Reader::from_str(std::str::from_utf8(body)?);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut request = Request::default();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = start.local_name().as_ref().to_vec();
                if path.is_empty() {
                    ensure_root(&name)?;
                }
                path.push(name);
                if let Some(field) = field_at(&path) {
                    request.field_mut(field).clear();
                }
            }
            Event::Empty(start) => {
                let name = start.local_name().as_ref().to_vec();
                if path.is_empty() {
                    ensure_root(&name)?;
                    return Ok(request);
                }
                path.push(name);
                if let Some(field) = field_at(&path) {
                    request.field_mut(field).clear();
                }
                path.pop();
            }
            Event::End(_) => {
                path.pop();
                if path.is_empty() {
                    return Ok(request);
                }
            }
            Event::Text(text) => {
                if let Some(field) = field_at(&path) {
                    request.field_mut(field).push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(field) = field_at(&path) {
                    request.field_mut(field).push_str(std::str::from_utf8(&data)?);
                }
            }
            Event::Eof if path.is_empty() => return Err(DecodeError::MissingRoot),
            Event::Eof => return Err(DecodeError::UnexpectedEof),
            _ => {}
        }
    }
}

fn ensure_root(name: &[u8]) -> Result<(), DecodeError> {
    if name == b"Autodiscover" {
        Ok(())
    } else {
        Err(DecodeError::UnexpectedRoot {
            found: String::from_utf8_lossy(name).into_owned(),
        })
    }
}

fn field_at(path: &[Vec<u8>]) -> Option<Field> {
    match path {
        [_, request, leaf] if request.as_slice() == b"Request" => match leaf.as_slice() {
            b"EMailAddress" => Some(Field::EmailAddress),
            b"AcceptableResponseSchema" => Some(Field::AcceptableResponseSchema),
            _ => None,
        },
        _ => None,
    }
}
