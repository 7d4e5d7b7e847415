//! SOAP 1.1 request for the webserviceX GlobalWeather service

use std::borrow::Cow;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Service endpoint the form posts to.
pub const ENDPOINT: &str = "http://www.webservicex.net/globalweather.asmx";

/// Value of the `SOAPAction` header.
pub const SOAP_ACTION: &str = "http://www.webserviceX.NET/GetCityWeatherByZIP";

/// Value of the `Content-Type` header.
pub const CONTENT_TYPE: &str = "text/xml;charset=UTF-8";

/// Error shown for any non-success HTTP status.
pub const FETCH_FAILED: &str = "Failed to fetch weather data";

const ENVELOPE_HEAD: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:web="http://www.webserviceX.NET">
  <soap:Body>
    <web:GetCityWeatherByZIP><web:ZIP>"#;

const ENVELOPE_TAIL: &str = r#"</web:ZIP></web:GetCityWeatherByZIP>
  </soap:Body>
</soap:Envelope>"#;

/// How the ZIP code is written into the `<web:ZIP>` element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ZipEncoding {
    /// Interpolate the input as typed. XML metacharacters in the input
    /// will break the envelope.
    #[default]
    Verbatim,
    /// Escape `& < > " '` before interpolating.
    Escaped,
}

impl ZipEncoding {
    pub fn encode<'a>(&self, zip: &'a str) -> Cow<'a, str> {
        match self {
            ZipEncoding::Verbatim => Cow::Borrowed(zip),
            ZipEncoding::Escaped => escape_xml(zip),
        }
    }
}

/// Build the `GetCityWeatherByZIP` envelope for one submission.
pub fn build_envelope(zip: &str, encoding: ZipEncoding) -> String {
    let zip = encoding.encode(zip);
    let mut envelope = String::with_capacity(ENVELOPE_HEAD.len() + zip.len() + ENVELOPE_TAIL.len());
    envelope.push_str(ENVELOPE_HEAD);
    envelope.push_str(&zip);
    envelope.push_str(ENVELOPE_TAIL);
    envelope
}

fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}
