use std::env;
use std::ffi::OsString;
use std::num::NonZeroUsize;

use crate::error::{Result, ThreadviewError};

pub const BATCH_SIZE_ENV: &str = "THREADVIEW_BATCH_SIZE";
pub const ROLE_ENV: &str = "THREADVIEW_ROLE";
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub batch_size: NonZeroUsize,
    pub role_filter: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            role_filter: None,
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var_os(key))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let non_empty = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .map(|value| value.to_string_lossy().into_owned())
        };

        // Precedence:
        // 1) THREADVIEW_BATCH_SIZE
        // 2) 10 threads per window
        let batch_size = match non_empty(BATCH_SIZE_ENV) {
            Some(raw) => parse_batch_size(&raw)?,
            None => DEFAULT_BATCH_SIZE,
        };

        // Precedence:
        // 1) THREADVIEW_ROLE
        // 2) no filter, every role is shown
        let role_filter = non_empty(ROLE_ENV);

        Ok(Self {
            batch_size,
            role_filter,
        })
    }

    /// Applies command-line overrides on top of the environment.
    #[must_use]
    pub fn with_overrides(
        mut self,
        batch_size: Option<NonZeroUsize>,
        role_filter: Option<String>,
    ) -> Self {
        if let Some(batch_size) = batch_size {
            self.batch_size = batch_size;
        }
        if role_filter.is_some() {
            self.role_filter = role_filter;
        }
        self
    }

    pub fn role_filter(&self) -> Option<&str> {
        self.role_filter.as_deref()
    }
}

pub fn parse_batch_size(raw: &str) -> Result<NonZeroUsize> {
    raw.trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| ThreadviewError::InvalidConfig(format!("{BATCH_SIZE_ENV}={raw}")))
}
