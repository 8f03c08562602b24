//! Alias-based command matcher
//!
//! 将一个或多个别名映射到命令，并按输入文本的首个 token 查找命令。
//! 命令的执行、参数解析和持久化由调用方负责。

pub mod command_matcher;
pub mod config;

pub use command_matcher::{CommandMatcher, Match, MatcherError};
pub use config::{MatcherConfig, DEFAULT_SEPARATOR};
