use std::fs::File;
use std::time::Duration;

use serde_json::Value;

use crate::error::Error;
use crate::normalize::RawResponse;

/// Query or form parameters, in submission order.
pub type Params = Vec<(&'static str, String)>;

/// A local file handed to the transport for a multipart upload.
///
/// The handle is owned, so it is closed whenever the upload value is dropped.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub file: File,
    pub length: u64,
}

/// What the transport got back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status. The body decides success; the status is reported in
    /// [`Error::Decode`] when the body is not JSON.
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string().into_bytes(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|value| value.split(';').next())
            .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
            .unwrap_or(false)
    }

    /// Parse the body as a JSON object.
    pub fn raw(&self) -> Result<RawResponse, Error> {
        let value = serde_json::from_slice::<Value>(&self.body)
            .map_err(|err| Error::decode(self.status, err))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(Error::NotAnObject),
        }
    }
}

/// HTTP plumbing the client delegates to.
pub trait Transport {
    fn get(
        &self,
        url: &str,
        query: &[(&'static str, String)],
        timeout: Option<Duration>,
    ) -> Result<TransportResponse, Error>;

    fn post_json(
        &self,
        url: &str,
        body: &Value,
        timeout: Option<Duration>,
    ) -> Result<TransportResponse, Error>;

    fn post_multipart(
        &self,
        url: &str,
        form: &[(&'static str, String)],
        upload: Upload,
        timeout: Option<Duration>,
    ) -> Result<TransportResponse, Error>;
}

#[cfg(feature = "with-http")]
pub use http::HttpTransport;

#[cfg(feature = "with-http")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::multipart::{Form, Part};
    use reqwest::blocking::{Client, RequestBuilder};
    use reqwest::header::CONTENT_TYPE;
    use serde_json::Value;

    use super::{Transport, TransportResponse, Upload};
    use crate::error::Error;

    /// [`Transport`] backed by a blocking `reqwest` client.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: Client,
    }

    impl HttpTransport {
        pub fn new() -> Result<Self, Error> {
            let client = Client::builder().build().map_err(Error::http)?;
            Ok(Self { client })
        }

        pub fn from_client(client: Client) -> Self {
            Self { client }
        }

        fn send(
            &self,
            request: RequestBuilder,
            timeout: Option<Duration>,
        ) -> Result<TransportResponse, Error> {
            let request = match timeout {
                Some(timeout) => request.timeout(timeout),
                None => request,
            };
            let response = request.send().map_err(Error::http)?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().map_err(Error::http)?.to_vec();
            Ok(TransportResponse {
                status,
                content_type,
                body,
            })
        }
    }

    impl Transport for HttpTransport {
        fn get(
            &self,
            url: &str,
            query: &[(&'static str, String)],
            timeout: Option<Duration>,
        ) -> Result<TransportResponse, Error> {
            self.send(self.client.get(url).query(query), timeout)
        }

        fn post_json(
            &self,
            url: &str,
            body: &Value,
            timeout: Option<Duration>,
        ) -> Result<TransportResponse, Error> {
            self.send(self.client.post(url).json(body), timeout)
        }

        fn post_multipart(
            &self,
            url: &str,
            form: &[(&'static str, String)],
            upload: Upload,
            timeout: Option<Duration>,
        ) -> Result<TransportResponse, Error> {
            let Upload {
                file_name,
                file,
                length,
            } = upload;
            let part = Part::reader_with_length(file, length)
                .file_name(file_name)
                .mime_str("text/csv")
                .map_err(Error::http)?;
            let form = form
                .iter()
                .fold(Form::new(), |form, (name, value)| {
                    form.text(*name, value.clone())
                })
                .part("file", part);
            self.send(self.client.post(url).multipart(form), timeout)
        }
    }
}
