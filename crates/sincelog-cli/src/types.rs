use clap::ValueEnum;
use sincelog_types::{ChangeType, PostType};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ChangeTypeFilter {
    Any,
    Introduced,
    Modified,
    Deprecated,
}

impl From<ChangeTypeFilter> for Option<ChangeType> {
    fn from(filter: ChangeTypeFilter) -> Self {
        match filter {
            ChangeTypeFilter::Any => None,
            ChangeTypeFilter::Introduced => Some(ChangeType::Introduced),
            ChangeTypeFilter::Modified => Some(ChangeType::Modified),
            ChangeTypeFilter::Deprecated => Some(ChangeType::Deprecated),
        }
    }
}

impl fmt::Display for ChangeTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Option::<ChangeType>::from(*self) {
            Some(change_type) => write!(f, "{}", change_type),
            None => write!(f, "any"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PostTypeFilter {
    Any,
    Class,
    Method,
    Function,
    Hook,
}

impl From<PostTypeFilter> for Option<PostType> {
    fn from(filter: PostTypeFilter) -> Self {
        match filter {
            PostTypeFilter::Any => None,
            PostTypeFilter::Class => Some(PostType::Class),
            PostTypeFilter::Method => Some(PostType::Method),
            PostTypeFilter::Function => Some(PostType::Function),
            PostTypeFilter::Hook => Some(PostType::Hook),
        }
    }
}

impl fmt::Display for PostTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Option::<PostType>::from(*self) {
            Some(post_type) => write!(f, "{}", post_type),
            None => write!(f, "any"),
        }
    }
}
