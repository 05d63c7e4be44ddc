//! Name to constructor lookup for navigators and outputs
//!
//! Built once at startup; the CLI lists the registered names in its help.

use std::io;

use indexmap::IndexMap;

use crate::config::RunConfig;
use crate::error::UsageError;
use crate::navigation::navigator::Navigator;
use crate::navigation::navigators::{GitHubNavigator, LinkNavigator, TemplateNavigator, UrlNavigator};
use crate::output::{JsonOutput, Output, SimpleOutput};
use crate::session::Session;

pub type NavigatorConstructor = fn(Session, &RunConfig) -> Result<Box<dyn Navigator>, UsageError>;
pub type OutputConstructor = fn(&RunConfig) -> Box<dyn Output>;

pub struct Registry {
    navigators: IndexMap<&'static str, NavigatorConstructor>,
    outputs: IndexMap<&'static str, OutputConstructor>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            navigators: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }

    /// Registry with every built-in navigator and output
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register_navigator(UrlNavigator::NAME, url_navigator);
        registry.register_navigator(TemplateNavigator::NAME, template_navigator);
        registry.register_navigator(LinkNavigator::NAME, link_navigator);
        registry.register_navigator(GitHubNavigator::NAME, github_navigator);

        registry.register_output(SimpleOutput::<io::Stdout>::NAME, simple_output);
        registry.register_output(JsonOutput::<io::Stdout>::NAME, json_output);

        registry
    }

    pub fn register_navigator(&mut self, name: &'static str, constructor: NavigatorConstructor) {
        self.navigators.insert(name, constructor);
    }

    pub fn register_output(&mut self, name: &'static str, constructor: OutputConstructor) {
        self.outputs.insert(name, constructor);
    }

    pub fn list_navigators(&self) -> Vec<&'static str> {
        self.navigators.keys().copied().collect()
    }

    pub fn list_outputs(&self) -> Vec<&'static str> {
        self.outputs.keys().copied().collect()
    }

    /// Fails when `name` is not registered, before any session exists.
    pub fn ensure_navigator(&self, name: &str) -> Result<NavigatorConstructor, UsageError> {
        self.navigators
            .get(name)
            .copied()
            .ok_or_else(|| UsageError::UnknownNavigator {
                name: name.to_string(),
                available: self.list_navigators(),
            })
    }

    pub fn get_navigator(
        &self,
        name: &str,
        session: Session,
        config: &RunConfig,
    ) -> Result<Box<dyn Navigator>, UsageError> {
        let constructor = self.ensure_navigator(name)?;
        constructor(session, config)
    }

    pub fn get_output(&self, name: &str, config: &RunConfig) -> Result<Box<dyn Output>, UsageError> {
        let constructor = self
            .outputs
            .get(name)
            .ok_or_else(|| UsageError::UnknownOutput {
                name: name.to_string(),
                available: self.list_outputs(),
            })?;
        Ok(constructor(config))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// `url` turns into the template navigator when `--template` is set
fn url_navigator(session: Session, config: &RunConfig) -> Result<Box<dyn Navigator>, UsageError> {
    if config.template {
        return template_navigator(session, config);
    }
    Ok(Box::new(UrlNavigator::new(session, config)))
}

fn template_navigator(session: Session, config: &RunConfig) -> Result<Box<dyn Navigator>, UsageError> {
    Ok(Box::new(TemplateNavigator::new(session, config)?))
}

fn link_navigator(session: Session, config: &RunConfig) -> Result<Box<dyn Navigator>, UsageError> {
    Ok(Box::new(LinkNavigator::new(session, config)?))
}

fn github_navigator(session: Session, config: &RunConfig) -> Result<Box<dyn Navigator>, UsageError> {
    Ok(Box::new(GitHubNavigator::new(session, config)))
}

fn simple_output(_config: &RunConfig) -> Box<dyn Output> {
    Box::new(SimpleOutput::new(io::stdout()))
}

fn json_output(config: &RunConfig) -> Box<dyn Output> {
    Box::new(JsonOutput::new(io::stdout(), config.digest))
}
