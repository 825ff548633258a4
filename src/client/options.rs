use super::transport::Params;
use crate::error::ClientError;

/// Form options for a bulk validation upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendFileOptions {
    /// 1-based column holding the addresses.
    pub email_address_column: u32,
    pub return_url: Option<String>,
    pub first_name_column: Option<u32>,
    pub last_name_column: Option<u32>,
    pub gender_column: Option<u32>,
    pub ip_address_column: Option<u32>,
    pub has_header_row: bool,
    pub remove_duplicate: bool,
}

impl SendFileOptions {
    pub fn new(email_address_column: u32) -> Self {
        Self {
            email_address_column,
            return_url: None,
            first_name_column: None,
            last_name_column: None,
            gender_column: None,
            ip_address_column: None,
            has_header_row: false,
            remove_duplicate: true,
        }
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn with_name_columns(mut self, first: u32, last: u32) -> Self {
        self.first_name_column = Some(first);
        self.last_name_column = Some(last);
        self
    }

    pub fn with_gender_column(mut self, column: u32) -> Self {
        self.gender_column = Some(column);
        self
    }

    pub fn with_ip_address_column(mut self, column: u32) -> Self {
        self.ip_address_column = Some(column);
        self
    }

    pub fn has_header_row(mut self, value: bool) -> Self {
        self.has_header_row = value;
        self
    }

    pub fn remove_duplicate(mut self, value: bool) -> Self {
        self.remove_duplicate = value;
        self
    }

    pub(crate) fn form(&self) -> Result<Params, ClientError> {
        let mut form = vec![(
            "email_address_column",
            column("email_address_column", self.email_address_column)?,
        )];
        if let Some(url) = &self.return_url {
            form.push(("return_url", url.clone()));
        }
        let optional = [
            ("first_name_column", self.first_name_column),
            ("last_name_column", self.last_name_column),
            ("gender_column", self.gender_column),
            ("ip_address_column", self.ip_address_column),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                form.push((name, column(name, value)?));
            }
        }
        form.push(("has_header_row", self.has_header_row.to_string()));
        form.push(("remove_duplicate", self.remove_duplicate.to_string()));
        Ok(form)
    }
}

/// Form options for a bulk scoring upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringSendFileOptions {
    pub email_address_column: u32,
    pub return_url: Option<String>,
    pub has_header_row: bool,
    pub remove_duplicate: bool,
}

impl ScoringSendFileOptions {
    pub fn new(email_address_column: u32) -> Self {
        Self {
            email_address_column,
            return_url: None,
            has_header_row: false,
            remove_duplicate: true,
        }
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn has_header_row(mut self, value: bool) -> Self {
        self.has_header_row = value;
        self
    }

    pub fn remove_duplicate(mut self, value: bool) -> Self {
        self.remove_duplicate = value;
        self
    }

    pub(crate) fn form(&self) -> Result<Params, ClientError> {
        let mut form = vec![(
            "email_address_column",
            column("email_address_column", self.email_address_column)?,
        )];
        if let Some(url) = &self.return_url {
            form.push(("return_url", url.clone()));
        }
        form.push(("has_header_row", self.has_header_row.to_string()));
        form.push(("remove_duplicate", self.remove_duplicate.to_string()));
        Ok(form)
    }
}

fn column(name: &'static str, value: u32) -> Result<String, ClientError> {
    if value == 0 {
        return Err(ClientError::InvalidColumn { name, value });
    }
    Ok(value.to_string())
}

/// Person name parts sent to the format guessing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonName<'a> {
    pub first_name: Option<&'a str>,
    pub middle_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

impl<'a> PersonName<'a> {
    pub fn new(first_name: &'a str) -> Self {
        Self {
            first_name: Some(first_name),
            ..Self::default()
        }
    }

    pub fn middle(mut self, middle_name: &'a str) -> Self {
        self.middle_name = Some(middle_name);
        self
    }

    pub fn last(mut self, last_name: &'a str) -> Self {
        self.last_name = Some(last_name);
        self
    }
}

pub(crate) fn push_name(params: &mut Params, name: &PersonName<'_>) {
    let parts = [
        ("first_name", name.first_name),
        ("middle_name", name.middle_name),
        ("last_name", name.last_name),
    ];
    for (key, value) in parts {
        if let Some(value) = non_blank(value) {
            params.push((key, value.to_string()));
        }
    }
}

/// Exactly one of `domain` and `company_name` must be given.
pub(crate) fn domain_or_company(
    domain: Option<&str>,
    company_name: Option<&str>,
) -> Result<Params, ClientError> {
    match (non_blank(domain), non_blank(company_name)) {
        (Some(domain), None) => Ok(vec![("domain", domain.to_string())]),
        (None, Some(company)) => Ok(vec![("company_name", company.to_string())]),
        (Some(_), Some(_)) => Err(ClientError::ConflictingParameters {
            first: "domain",
            second: "company_name",
        }),
        (None, None) => Err(ClientError::MissingParameter {
            first: "domain",
            second: "company_name",
        }),
    }
}

pub(crate) fn require(name: &'static str, value: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::EmptyParameter { name });
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
