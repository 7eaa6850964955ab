//! Completion certificate.

use chrono::NaiveDate;

use crate::error::CertificateError;

/// A named, dated completion record. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate {
    name: String,
    formatted_date: String,
}

impl Certificate {
    /// Build a certificate for `name` (trimmed) dated `today`.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::EmptyName` if the name is blank.
    pub fn generate(name: &str, today: NaiveDate) -> Result<Self, CertificateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CertificateError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            formatted_date: format_long_date(today),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formatted_date(&self) -> &str {
        &self.formatted_date
    }

    /// Download file name: `{prefix}-{slug}.png`.
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{prefix}-{}.png", file_slug(&self.name))
    }
}

/// en-US long form, e.g. "October 16, 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Collapse every run of non-alphanumeric characters into one `-`, without
/// leading or trailing separators.
fn file_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }
    slug
}
