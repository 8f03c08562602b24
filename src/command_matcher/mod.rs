//! Command Matcher Module
//!
//! 提供别名注册和基于首个 token 的命令匹配功能

pub mod errors;
pub mod matcher;


pub use errors::MatcherError;
pub use matcher::{CommandMatcher, Match};
