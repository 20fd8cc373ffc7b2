//! Session cookie jar for job boards that only render postings to signed-in users.
//!
//! The file holds one `name=value` pair per line; blank lines and `#` comments are
//! ignored. Obtaining the cookies (logging in) happens outside this service.

use std::path::Path;

use anyhow::{Context, Result};

/// Cookies LinkedIn requires before it serves a job page.
pub const LINKEDIN_REQUIRED_COOKIES: &[&str] = &["li_at", "JSESSIONID"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<(String, String)>,
}

impl CookieJar {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read cookie file '{}'", path.display()))?;
        Ok(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let cookies = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let (name, value) = line.split_once('=')?;
                let name = name.trim();
                (!name.is_empty()).then(|| (name.to_string(), value.trim().to_string()))
            })
            .collect();
        Self { cookies }
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.iter().any(|(n, _)| n == name)
    }

    /// Names from `required` that the jar does not hold.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// Value for a `Cookie` request header, or `None` when the jar is empty.
    pub fn header_value(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
