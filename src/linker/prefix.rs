use async_trait::async_trait;
use log::*;
use reqwest::StatusCode;
use std::{sync::Arc, time::Duration};

use crate::{
    changelog::Dependency,
    error::Result,
    linker::Mapper,
};

/// Tells whether a URL points at an existing page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlChecker: Send + Sync {
    async fn is_ok(&self, url: &str) -> bool;
}

/// Checks URLs with a GET request. Only a `200 OK` counts.
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UrlChecker for HttpChecker {
    async fn is_ok(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(err) => {
                debug!("request to {url} failed: {err}");
                false
            }
        }
    }
}

/// Wraps a mapper whose URLs embed the version, fixing up a leading `v` the
/// release tags have but the dependency version lacks, or the other way
/// round.
pub struct VersionPrefixValidator {
    inner: Box<dyn Mapper>,
    checker: Arc<dyn UrlChecker>,
}

impl VersionPrefixValidator {
    pub fn new(inner: Box<dyn Mapper>, checker: Arc<dyn UrlChecker>) -> Self {
        Self { inner, checker }
    }

    async fn checked(&self, dependency: &Dependency) -> Option<String> {
        let url = self.inner.resolve(dependency).await?;
        if self.checker.is_ok(&url).await {
            Some(url)
        } else {
            debug!("{url} did not validate");
            None
        }
    }
}

#[async_trait]
impl Mapper for VersionPrefixValidator {
    async fn resolve(&self, dependency: &Dependency) -> Option<String> {
        if let Some(url) = self.checked(dependency).await {
            return Some(url);
        }

        let mut toggled = dependency.clone();
        toggled.to = dependency.to.as_ref().map(|to| to.toggle_prefix());

        self.checked(&toggled).await
    }
}
