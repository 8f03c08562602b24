//! Command Matcher Implementation
//!
//! 别名到命令的映射，以及按首个 token 匹配输入文本

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::command_matcher::errors::MatcherError;
use crate::config::{MatcherConfig, DEFAULT_SEPARATOR};

/// Alias registry that resolves input lines to commands
///
/// `C` is opaque to the matcher: it is stored, compared with `PartialEq`
/// for [`deregister`](Self::deregister) and [`for_each`](Self::for_each),
/// and handed back as clones. Wrap handlers in `Arc` to share them cheaply.
#[derive(Debug)]
pub struct CommandMatcher<C> {
    state: RwLock<MatcherState<C>>,
}

/// Mapping and separator live under one lock so `match_text` never races
/// with `set_separator`.
#[derive(Debug)]
struct MatcherState<C> {
    commands: HashMap<String, C>,
    separator: String,
}

/// Result of matching a line of text
#[derive(Debug, Clone, PartialEq)]
pub struct Match<C> {
    /// Command bound to the first token, if any
    pub command: Option<C>,
    /// Every token produced by splitting the input, empty tokens included
    pub tokens: Vec<String>,
}

impl<C> Match<C> {
    /// Whether a command was found
    pub fn is_match(&self) -> bool {
        self.command.is_some()
    }

    /// The token used as the lookup key
    pub fn alias(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    /// Tokens after the alias
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }
}

impl<C> CommandMatcher<C>
where
    C: Clone + PartialEq,
{
    /// Create an empty matcher that splits on a single space
    pub fn new() -> Self {
        Self::from_state(DEFAULT_SEPARATOR.to_string())
    }

    /// Create an empty matcher with a custom separator
    pub fn with_separator(separator: impl Into<String>) -> Result<Self, MatcherError> {
        let separator = separator.into();
        validate_separator(&separator)?;
        Ok(Self::from_state(separator))
    }

    /// Create an empty matcher from a loaded configuration
    pub fn from_config(config: &MatcherConfig) -> Result<Self, MatcherError> {
        Self::with_separator(config.separator.clone())
    }

    fn from_state(separator: String) -> Self {
        Self {
            state: RwLock::new(MatcherState {
                commands: HashMap::new(),
                separator,
            }),
        }
    }

    /// Bind every alias to `command`, overwriting existing bindings
    ///
    /// The whole batch is applied under one write lock. Returns `command`
    /// so registration can be chained into construction.
    pub fn register<I, S>(&self, aliases: I, command: C) -> C
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.write();
        for alias in aliases {
            let alias = alias.into();
            if state.commands.insert(alias.clone(), command.clone()).is_some() {
                log::debug!("[CommandMatcher] alias '{}' rebound", alias);
            } else {
                log::trace!("[CommandMatcher] alias '{}' registered", alias);
            }
        }
        command
    }

    /// Remove the given aliases; unknown aliases are ignored
    pub fn deregister_aliases<I, S>(&self, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.write();
        for alias in aliases {
            if state.commands.remove(alias.as_ref()).is_some() {
                log::trace!("[CommandMatcher] alias '{}' removed", alias.as_ref());
            }
        }
    }

    /// Remove every alias bound to a command equal to `command`
    pub fn deregister(&self, command: &C) {
        let mut state = self.write();
        let before = state.commands.len();
        state.commands.retain(|_, bound| *bound != *command);
        let removed = before - state.commands.len();
        if removed > 0 {
            log::debug!("[CommandMatcher] deregistered command with {} alias(es)", removed);
        }
    }

    /// Split `text` on the separator and look up the first token
    ///
    /// The split is literal: leading, trailing and repeated separators
    /// produce empty tokens, and `""` yields a single empty token.
    pub fn match_text(&self, text: &str) -> Match<C> {
        let state = self.read();
        let tokens: Vec<String> = text
            .split(state.separator.as_str())
            .map(str::to_string)
            .collect();
        let command = tokens
            .first()
            .and_then(|alias| state.commands.get(alias))
            .cloned();
        Match { command, tokens }
    }

    /// Look up a single alias without tokenizing
    pub fn find(&self, alias: &str) -> Option<C> {
        self.read().commands.get(alias).cloned()
    }

    /// Call `callback` once per distinct command with all of its aliases
    ///
    /// Holds the write lock for the whole iteration, so the callback sees a
    /// single snapshot. The lock is not reentrant: calling back into this
    /// matcher from `callback` deadlocks.
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&[String], &C),
    {
        let state = self.write();
        let mut groups: Vec<(&C, Vec<String>)> = Vec::new();
        for (alias, command) in &state.commands {
            match groups.iter_mut().find(|(bound, _)| *bound == command) {
                Some((_, aliases)) => aliases.push(alias.clone()),
                None => groups.push((command, vec![alias.clone()])),
            }
        }
        for (command, aliases) in groups {
            callback(&aliases, command);
        }
    }

    /// Current separator
    pub fn separator(&self) -> String {
        self.read().separator.clone()
    }

    /// Replace the separator used by subsequent matches
    pub fn set_separator(&self, separator: impl Into<String>) -> Result<(), MatcherError> {
        let separator = separator.into();
        validate_separator(&separator)?;
        let mut state = self.write();
        log::debug!(
            "[CommandMatcher] separator changed from {:?} to {:?}",
            state.separator,
            separator
        );
        state.separator = separator;
        Ok(())
    }

    /// Number of registered aliases
    pub fn len(&self) -> usize {
        self.read().commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().commands.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, MatcherState<C>> {
        self.state.read().unwrap_or_else(|poisoned| {
            log::warn!("[CommandMatcher] recovering from poisoned lock");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, MatcherState<C>> {
        self.state.write().unwrap_or_else(|poisoned| {
            log::warn!("[CommandMatcher] recovering from poisoned lock");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl<C> Default for CommandMatcher<C>
where
    C: Clone + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

fn validate_separator(separator: &str) -> Result<(), MatcherError> {
    if separator.is_empty() {
        return Err(MatcherError::EmptySeparator);
    }
    Ok(())
}
