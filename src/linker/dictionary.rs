use async_trait::async_trait;
use log::*;
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

use crate::{
    changelog::Dependency,
    error::Result,
    linker::{Mapper, valid_url},
};

#[derive(Debug, Default, Deserialize)]
struct DictionaryFile {
    #[serde(default)]
    dictionary: BTreeMap<String, String>,
}

/// Maps dependency names to URL templates.
///
/// Templates are rendered with `tera` using the fields of the dependency:
/// `name`, `from`, `to`, `author`, `pr` and `commit`. A field the dependency
/// does not have is left out of the context, so a template that uses it
/// fails to render and the dependency stays unlinked.
#[derive(Debug, Clone, Default)]
pub struct DictionaryMapper {
    templates: BTreeMap<String, String>,
}

impl DictionaryMapper {
    pub fn new(templates: BTreeMap<String, String>) -> Self {
        Self { templates }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: DictionaryFile = serde_yaml::from_str(content)?;
        Ok(Self::new(file.dictionary))
    }

    /// Exact name first, otherwise the longest key contained in the name.
    fn template(&self, name: &str) -> Option<&str> {
        if let Some(template) = self.templates.get(name) {
            return Some(template);
        }

        self.templates
            .iter()
            .filter(|(key, _)| !key.is_empty() && name.contains(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, template)| template.as_str())
    }
}

fn context(dependency: &Dependency) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("name", &dependency.name);

    let optional = [
        ("from", dependency.from.as_ref().map(|v| v.original())),
        ("to", dependency.to.as_ref().map(|v| v.original())),
        ("author", dependency.meta.author.as_deref()),
        ("pr", dependency.meta.pr.as_deref()),
        ("commit", dependency.meta.commit.as_deref()),
    ];

    for (key, value) in optional {
        if let Some(value) = value {
            context.insert(key, value);
        }
    }

    context
}

#[async_trait]
impl Mapper for DictionaryMapper {
    async fn resolve(&self, dependency: &Dependency) -> Option<String> {
        let template = self.template(&dependency.name)?;

        match tera::Tera::one_off(template, &context(dependency), false) {
            Ok(url) => valid_url(url.trim().to_string()),
            Err(err) => {
                debug!(
                    "dictionary template for {} did not render: {err}",
                    dependency.name
                );
                None
            }
        }
    }
}
