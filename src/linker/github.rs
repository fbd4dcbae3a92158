use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    changelog::Dependency,
    linker::{Mapper, valid_url},
};

static GITHUB_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^github\.com/([^/]+)/([^/]+)").unwrap());

/// Release page of dependencies named after their GitHub repository, as Go
/// modules are (`github.com/org/repo/v2`).
#[derive(Debug, Clone, Copy, Default)]
pub struct GithubMapper;

#[async_trait]
impl Mapper for GithubMapper {
    async fn resolve(&self, dependency: &Dependency) -> Option<String> {
        let captures = GITHUB_NAME_REGEX.captures(&dependency.name)?;
        let to = dependency.to.as_ref()?;

        valid_url(format!(
            "https://github.com/{}/{}/releases/tag/{}",
            &captures[1],
            &captures[2],
            to.original()
        ))
    }
}
