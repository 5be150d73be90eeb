use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::{Request, ResponseSchema, RESPONSE_NAMESPACE, SCHEMA_2006, SCHEMA_2006A};
use crate::{config::ServiceConfig, errors::AppError};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileSync2006 {
    pub display_name: String,
    pub email_address: String,
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolEntry {
    pub server: String,
    pub login_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileSync2006a {
    pub display_name: String,
    pub protocols: Vec<ProtocolEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseDocument {
    Schema2006(MobileSync2006),
    Schema2006a(MobileSync2006a),
}

/// Builds the response document for the schema the client accepts.
///
/// An empty or unrecognised schema is rejected rather than answered with an empty body.
pub fn respond(request: &Request, service: &ServiceConfig) -> Result<ResponseDocument, AppError> {
    let email = &request.email_address;
    match ResponseSchema::from_uri(&request.acceptable_response_schema) {
        ResponseSchema::MobileSync2006 => Ok(ResponseDocument::Schema2006(MobileSync2006 {
            display_name: email.clone(),
            email_address: email.clone(),
            url: service.service_uri.clone(),
            name: service.service_uri.clone(),
        })),
        ResponseSchema::MobileSync2006a => Ok(ResponseDocument::Schema2006a(MobileSync2006a {
            display_name: email.clone(),
            protocols: vec![
                ProtocolEntry {
                    server: service.mail_server.clone(),
                    login_name: email.clone(),
                };
                2
            ],
        })),
        ResponseSchema::Unknown(schema) => Err(AppError::unsupported_schema(schema)),
    }
}

impl ResponseDocument {
    pub fn schema(&self) -> ResponseSchema {
        match self {
            Self::Schema2006(_) => ResponseSchema::MobileSync2006,
            Self::Schema2006a(_) => ResponseSchema::MobileSync2006a,
        }
    }

    pub fn render(&self) -> Result<String, AppError> {
        let body = match self {
            Self::Schema2006(document) => {
                quick_xml::se::to_string(&wire::Document2006::from(document))
            }
            Self::Schema2006a(document) => {
                quick_xml::se::to_string(&wire::Document2006a::from(document))
            }
        }
        .map_err(|err| {
            AppError::internal(format!(
                "failed to render {} response: {err}",
                self.schema().as_uri()
            ))
        })?;

        Ok(format!("{XML_DECLARATION}{body}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    ProviderUnavailable,
    Internal,
}

impl ErrorKind {
    pub fn code(self) -> u16 {
        match self {
            Self::InvalidRequest => 600,
            Self::ProviderUnavailable => 601,
            Self::Internal => 603,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid Request",
            Self::ProviderUnavailable => "Provider is not available",
            Self::Internal => "Internal Server Error",
        }
    }
}

/// Renders the error document for `now`. Nothing from the request is echoed back.
pub fn render_error(kind: ErrorKind, now: DateTime<Utc>) -> String {
    format!(
        "{XML_DECLARATION}<Autodiscover xmlns=\"{RESPONSE_NAMESPACE}\">\
         <Response>\
         <Error Time=\"{time}\">\
         <ErrorCode>{code}</ErrorCode>\
         <Message>{message}</Message>\
         </Error>\
         </Response>\
         </Autodiscover>\n",
        time = now.to_rfc3339_opts(SecondsFormat::Millis, true),
        code = kind.code(),
        message = kind.message(),
    )
}

mod wire {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename = "Autodiscover")]
    pub struct Document2006<'a> {
        #[serde(rename = "@xmlns")]
        xmlns: &'static str,
        #[serde(rename = "Response")]
        response: Response2006<'a>,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Response2006<'a> {
        #[serde(rename = "@xmlns")]
        xmlns: &'static str,
        culture: &'static str,
        user: User2006<'a>,
        action: Action<'a>,
    }

    #[derive(Serialize)]
    struct User2006<'a> {
        #[serde(rename = "DisplayName")]
        display_name: &'a str,
        #[serde(rename = "EMailAddress")]
        email_address: &'a str,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Action<'a> {
        settings: Settings<'a>,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Settings<'a> {
        server: Server<'a>,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Server<'a> {
        #[serde(rename = "Type")]
        kind: &'static str,
        url: &'a str,
        name: &'a str,
    }

    impl<'a> From<&'a MobileSync2006> for Document2006<'a> {
        fn from(document: &'a MobileSync2006) -> Self {
            Self {
                xmlns: RESPONSE_NAMESPACE,
                response: Response2006 {
                    xmlns: SCHEMA_2006,
                    culture: "en:us",
                    user: User2006 {
                        display_name: &document.display_name,
                        email_address: &document.email_address,
                    },
                    action: Action {
                        settings: Settings {
                            server: Server {
                                kind: "MobileSync",
                                url: &document.url,
                                name: &document.name,
                            },
                        },
                    },
                },
            }
        }
    }

    #[derive(Serialize)]
    #[serde(rename = "Autodiscover")]
    pub struct Document2006a<'a> {
        #[serde(rename = "@xmlns")]
        xmlns: &'static str,
        #[serde(rename = "Response")]
        response: Response2006a<'a>,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Response2006a<'a> {
        #[serde(rename = "@xmlns")]
        xmlns: &'static str,
        user: User2006a<'a>,
        protocol: Vec<Protocol<'a>>,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct User2006a<'a> {
        display_name: &'a str,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Protocol<'a> {
        server: &'a str,
        login_name: &'a str,
    }

    impl<'a> From<&'a MobileSync2006a> for Document2006a<'a> {
        fn from(document: &'a MobileSync2006a) -> Self {
            Self {
                xmlns: RESPONSE_NAMESPACE,
                response: Response2006a {
                    xmlns: SCHEMA_2006A,
                    user: User2006a {
                        display_name: &document.display_name,
                    },
                    protocol: document
                        .protocols
                        .iter()
                        .map(|entry| Protocol {
                            server: &entry.server,
                            login_name: &entry.login_name,
                        })
                        .collect(),
                },
            }
        }
    }
}
