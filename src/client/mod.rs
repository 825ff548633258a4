//! Request orchestration against the ZeroBounce API.
//!
//! [`ZeroBounce`] validates caller input, builds parameters, hands the request
//! to a [`Transport`] and turns the reply into a typed model. Input errors are
//! reported before anything is sent.

mod options;
mod transport;

pub use options::{PersonName, ScoringSendFileOptions, SendFileOptions};
#[cfg(feature = "with-http")]
pub use transport::HttpTransport;
pub use transport::{Params, Transport, TransportResponse, Upload};

use std::fs::{self, File};
use std::path::Path;

use chrono::NaiveDate;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, endpoint};
use crate::error::{ClientError, Error};
use crate::models::{
    ActivityResponse, ApiUsageResponse, BatchElement, CreditsResponse, DeleteFileResponse,
    FileStatusResponse, FindDomainResponse, FindEmailFormatResponse, FromRaw, GetFileResponse,
    GuessFormatResponse, SendFileResponse, ValidateBatchResponse, ValidateResponse,
};
use crate::normalize::{DATE_FORMAT, DIAGNOSTICS_TARGET, RawResponse, list_or_scalar};
use options::{domain_or_company, push_name, require};

/// Which bulk deployment a file operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BulkService {
    Validation,
    Scoring,
}

impl BulkService {
    fn base(self, config: &ClientConfig) -> &str {
        match self {
            Self::Validation => config.bulk_url(),
            Self::Scoring => config.scoring_url(),
        }
    }
}

pub struct ZeroBounce<T> {
    config: ClientConfig,
    transport: T,
}

#[cfg(feature = "with-http")]
impl ZeroBounce<HttpTransport> {
    /// Client for the default region using a fresh HTTP transport.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::with_config(ClientConfig::new(api_key)?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self::with_transport(config, HttpTransport::new()?))
    }
}

impl<T: Transport> ZeroBounce<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get_credits(&self) -> Result<CreditsResponse, Error> {
        self.get(self.config.base_url(), "getcredits", Vec::new())
    }

    pub fn get_api_usage(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<ApiUsageResponse, Error> {
        let params = vec![
            ("start_date", start_date.format(DATE_FORMAT).to_string()),
            ("end_date", end_date.format(DATE_FORMAT).to_string()),
        ];
        self.get(self.config.base_url(), "getapiusage", params)
    }

    pub fn get_activity(&self, email: &str) -> Result<ActivityResponse, Error> {
        require("email", email)?;
        self.get(
            self.config.base_url(),
            "activity",
            vec![("email", email.to_string())],
        )
    }

    pub fn validate(
        &self,
        email: &str,
        ip_address: Option<&str>,
    ) -> Result<ValidateResponse, Error> {
        require("email", email)?;
        let mut params = vec![("email", email.to_string())];
        if let Some(ip) = ip_address {
            params.push(("ip_address", ip.to_string()));
        }
        self.get(self.config.base_url(), "validate", params)
    }

    /// Validate up to a hundred addresses in one call.
    pub fn validate_batch(&self, batch: &[BatchElement]) -> Result<ValidateBatchResponse, Error> {
        if batch.is_empty() {
            return Err(ClientError::EmptyParameter {
                name: "email_batch",
            }
            .into());
        }
        let body = json!({
            "api_key": self.config.api_key(),
            "email_batch": batch,
        });
        let url = endpoint(self.config.bulk_url(), "validatebatch");
        debug!(endpoint = "validatebatch", size = batch.len(), "POST");
        let response = self
            .transport
            .post_json(&url, &body, self.config.timeout())?;
        build(&response.raw()?)
    }

    pub fn send_file(
        &self,
        file_path: impl AsRef<Path>,
        options: &SendFileOptions,
    ) -> Result<SendFileResponse, Error> {
        let form = options.form()?;
        self.upload(BulkService::Validation, file_path.as_ref(), form)
    }

    pub fn scoring_send_file(
        &self,
        file_path: impl AsRef<Path>,
        options: &ScoringSendFileOptions,
    ) -> Result<SendFileResponse, Error> {
        let form = options.form()?;
        self.upload(BulkService::Scoring, file_path.as_ref(), form)
    }

    pub fn file_status(&self, file_id: &str) -> Result<FileStatusResponse, Error> {
        self.file_request(BulkService::Validation, "filestatus", file_id)
    }

    pub fn scoring_file_status(&self, file_id: &str) -> Result<FileStatusResponse, Error> {
        self.file_request(BulkService::Scoring, "filestatus", file_id)
    }

    /// Download the results of a submitted file to `download_path`.
    ///
    /// Missing parent directories are created. When the service answers with
    /// JSON instead of the file, nothing is written and the returned model
    /// carries the service message.
    pub fn get_file(
        &self,
        file_id: &str,
        download_path: impl AsRef<Path>,
    ) -> Result<GetFileResponse, Error> {
        self.download(BulkService::Validation, file_id, download_path.as_ref())
    }

    pub fn scoring_get_file(
        &self,
        file_id: &str,
        download_path: impl AsRef<Path>,
    ) -> Result<GetFileResponse, Error> {
        self.download(BulkService::Scoring, file_id, download_path.as_ref())
    }

    /// Only files whose processing is complete can be deleted.
    pub fn delete_file(&self, file_id: &str) -> Result<DeleteFileResponse, Error> {
        self.file_request(BulkService::Validation, "deletefile", file_id)
    }

    pub fn scoring_delete_file(&self, file_id: &str) -> Result<DeleteFileResponse, Error> {
        self.file_request(BulkService::Scoring, "deletefile", file_id)
    }

    #[deprecated(note = "use `find_email_format` or `find_domain`")]
    pub fn guess_format(
        &self,
        domain: &str,
        name: PersonName<'_>,
    ) -> Result<GuessFormatResponse, Error> {
        warn!(
            target: DIAGNOSTICS_TARGET,
            operation = "guess_format",
            "deprecated operation; use find_email_format or find_domain"
        );
        require("domain", domain)?;
        let mut params = vec![("domain", domain.to_string())];
        push_name(&mut params, &name);
        self.get(self.config.base_url(), "guessformat", params)
    }

    /// Guess the address of a person, looked up by domain or by company name.
    pub fn find_email_format(
        &self,
        domain: Option<&str>,
        company_name: Option<&str>,
        name: PersonName<'_>,
    ) -> Result<FindEmailFormatResponse, Error> {
        let mut params = domain_or_company(domain, company_name)?;
        require("first_name", name.first_name.unwrap_or_default())?;
        push_name(&mut params, &name);
        self.get(self.config.base_url(), "guessformat", params)
    }

    /// Find the domain of a company, or the formats used by a domain.
    pub fn find_domain(
        &self,
        domain: Option<&str>,
        company_name: Option<&str>,
    ) -> Result<FindDomainResponse, Error> {
        let params = domain_or_company(domain, company_name)?;
        self.get(self.config.base_url(), "guessformat", params)
    }

    fn get<M: FromRaw>(
        &self,
        base: &str,
        path: &'static str,
        params: Params,
    ) -> Result<M, Error> {
        let url = endpoint(base, path);
        let query = self.authenticated(params);
        debug!(endpoint = path, "GET");
        let response = self.transport.get(&url, &query, self.config.timeout())?;
        build(&response.raw()?)
    }

    fn file_request<M: FromRaw>(
        &self,
        service: BulkService,
        path: &'static str,
        file_id: &str,
    ) -> Result<M, Error> {
        require("file_id", file_id)?;
        self.get(
            service.base(&self.config),
            path,
            vec![("file_id", file_id.to_string())],
        )
    }

    fn upload(
        &self,
        service: BulkService,
        file_path: &Path,
        form: Params,
    ) -> Result<SendFileResponse, Error> {
        if file_path.as_os_str().is_empty() {
            return Err(ClientError::EmptyParameter { name: "file_path" }.into());
        }
        let file = File::open(file_path).map_err(|err| Error::io(file_path, err))?;
        let length = file
            .metadata()
            .map_err(|err| Error::io(file_path, err))?
            .len();
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());
        let upload = Upload {
            file_name,
            file,
            length,
        };

        let url = endpoint(service.base(&self.config), "sendfile");
        let form = self.authenticated(form);
        debug!(endpoint = "sendfile", ?service, bytes = length, "POST multipart");
        let response = self
            .transport
            .post_multipart(&url, &form, upload, self.config.timeout())?;
        build(&response.raw()?)
    }

    fn download(
        &self,
        service: BulkService,
        file_id: &str,
        download_path: &Path,
    ) -> Result<GetFileResponse, Error> {
        require("file_id", file_id)?;
        if download_path.as_os_str().is_empty() {
            return Err(ClientError::EmptyParameter {
                name: "download_path",
            }
            .into());
        }

        let url = endpoint(service.base(&self.config), "getfile");
        let query = self.authenticated(vec![("file_id", file_id.to_string())]);
        debug!(endpoint = "getfile", ?service, "GET");
        let response = self.transport.get(&url, &query, self.config.timeout())?;
        if response.is_json() {
            return build(&response.raw()?);
        }

        if let Some(parent) = download_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
        }
        fs::write(download_path, &response.body).map_err(|err| Error::io(download_path, err))?;
        info!(path = %download_path.display(), bytes = response.body.len(), "results file saved");
        Ok(GetFileResponse::downloaded(download_path.to_path_buf()))
    }

    fn authenticated(&self, params: Params) -> Params {
        let mut query = Vec::with_capacity(params.len() + 1);
        query.push(("api_key", self.config.api_key().to_string()));
        query.extend(params);
        query
    }
}

/// Check the top-level `error` signal, then build the model.
pub(crate) fn build<M: FromRaw>(raw: &RawResponse) -> Result<M, Error> {
    reject_error_key(raw)?;
    M::from_raw(raw)
}

fn reject_error_key(raw: &RawResponse) -> Result<(), Error> {
    let message = match raw.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(value) => list_or_scalar(value).filter(|message| !message.trim().is_empty()),
    };
    match message {
        Some(message) => Err(Error::api(message)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests;
