//! Exchange ActiveSync Autodiscover protocol engine
//!
//! Decodes the inbound `Autodiscover` request envelope, negotiates one of the two
//! mobilesync response schemas and renders the matching XML document.

pub mod request;
pub mod response;

pub use request::{decode, DecodeError, Request};
pub use response::{
    render_error, respond, ErrorKind, MobileSync2006, MobileSync2006a, ProtocolEntry,
    ResponseDocument,
};

/// Response schema URI of the single-server mobilesync document.
pub const SCHEMA_2006: &str =
    "http://schemas.microsoft.com/exchange/autodiscover/mobilesync/responseschema/2006";
/// Response schema URI of the document listing protocol entries.
pub const SCHEMA_2006A: &str =
    "http://schemas.microsoft.com/exchange/autodiscover/mobilesync/responseschema/2006a";

/// Namespace of the outer `Autodiscover` element of every response.
pub const RESPONSE_NAMESPACE: &str =
    "http://schemas.microsoft.com/exchange/autodiscover/responseschema/2006";

/// Content type of every response and error document.
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseSchema {
    MobileSync2006,
    MobileSync2006a,
    Unknown(String),
}

impl ResponseSchema {
    pub fn from_uri(uri: &str) -> Self {
        if uri == SCHEMA_2006 {
            Self::MobileSync2006
        } else if uri == SCHEMA_2006A {
            Self::MobileSync2006a
        } else {
            Self::Unknown(uri.to_string())
        }
    }

    pub fn as_uri(&self) -> &str {
        match self {
            Self::MobileSync2006 => SCHEMA_2006,
            Self::MobileSync2006a => SCHEMA_2006A,
            Self::Unknown(uri) => uri,
        }
    }
}
