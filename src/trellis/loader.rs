//! Language definition loading
//!
//! This module provides `LanguageLoader`, which reads a language definition (lexicon and
//! grammar) from a YAML or JSON file or string and turns it into a [Language]. The CLI and the
//! integration tests both go through it.
//!
//! # Format
//!
//!     lexicon:
//!       - { term: OPEN, pattern: "\\{\\{", set_flag: code }
//!       - { term: CLOSE, pattern: "\\}\\}", enable_when: code, clear_flag: code }
//!       - { term: NAME, pattern: "[a-z]+", enable_when: code }
//!       - { term: SPACE, pattern: "\\s+", on_match: ignore, enable_when: code }
//!       - { term: TEXT, pattern: "[^{]", on_match: concat, enable_unless: code }
//!     grammar:
//!       - { rule: template, pattern: "(TEXT | placeholder)*" }
//!       - { rule: placeholder, pattern: "OPEN NAME CLOSE", node: identity }
//!
//! `on_match` is one of `emit` (default), `ignore`, `concat` (merge runs of the same term) and
//! `first-capture` (content is the first capture group). `enable_when`/`enable_unless` gate a
//! term on a lexer flag, `set_flag`/`clear_flag` flip one after the term matched. `node` is one
//! of `identity` (default), `ignore` and `non-capturing`.

use crate::trellis::building::factories::{self, NodeFactory};
use crate::trellis::error::Result;
use crate::trellis::grammar::Grammar;
use crate::trellis::language::Language;
use crate::trellis::lexing::lexicon::TermRule;
use crate::trellis::lexing::{on_match, LexerContext, Lexicon, TermMatch};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML language definition: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON language definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported language definition extension '{extension}', expected yaml, yml or json")]
    UnsupportedFormat { extension: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnMatchKind {
    #[default]
    Emit,
    Ignore,
    Concat,
    FirstCapture,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeShape {
    #[default]
    Identity,
    Ignore,
    NonCapturing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermDefinition {
    pub term: String,
    pub pattern: String,
    #[serde(default)]
    pub on_match: OnMatchKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_unless: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_flag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    pub rule: String,
    pub pattern: String,
    #[serde(default)]
    pub node: NodeShape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lexicon: Vec<TermDefinition>,
    pub grammar: Vec<RuleDefinition>,
}

impl TermDefinition {
    fn to_rule(&self) -> TermRule {
        let mut rule = TermRule::new(self.term.clone(), self.pattern.clone());

        let when = self.enable_when.clone();
        let unless = self.enable_unless.clone();
        if when.is_some() || unless.is_some() {
            rule = rule.enable(move |ctx: &LexerContext| {
                when.as_deref().map_or(true, |f| ctx.flag(f))
                    && unless.as_deref().map_or(true, |f| !ctx.flag(f))
            });
        }

        let kind = self.on_match;
        let set = self.set_flag.clone();
        let clear = self.clear_flag.clone();
        if kind != OnMatchKind::Emit || set.is_some() || clear.is_some() {
            rule = rule.on_match(move |ctx: &mut LexerContext, matched: &TermMatch<'_>| {
                match kind {
                    OnMatchKind::Emit => ctx.push(matched.token()),
                    OnMatchKind::Ignore => on_match::ignore(ctx, matched),
                    OnMatchKind::Concat => on_match::concat_same_term(ctx, matched),
                    OnMatchKind::FirstCapture => on_match::emit_first_capture(ctx, matched),
                }
                if let Some(flag) = &set {
                    ctx.set_flag(flag.as_str(), true);
                }
                if let Some(flag) = &clear {
                    ctx.set_flag(flag.as_str(), false);
                }
            });
        }
        rule
    }
}

impl NodeShape {
    pub fn factory(self) -> Option<NodeFactory> {
        match self {
            NodeShape::Identity => None,
            NodeShape::Ignore => Some(factories::ignore()),
            NodeShape::NonCapturing => Some(factories::non_capturing()),
        }
    }
}

impl LanguageDefinition {
    pub fn lexicon(&self) -> Lexicon {
        self.lexicon
            .iter()
            .fold(Lexicon::new(), |lexicon, term| lexicon.rule(term.to_rule()))
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar.iter().fold(Grammar::new(), |grammar, rule| {
            match rule.node.factory() {
                Some(factory) => grammar.rule_with(rule.rule.clone(), rule.pattern.clone(), factory),
                None => grammar.rule(rule.rule.clone(), rule.pattern.clone()),
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct LanguageLoader {
    definition: LanguageDefinition,
    path: Option<PathBuf>,
}

impl LanguageLoader {
    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::result::Result<Self, LoaderError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let definition = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            _ => return Err(LoaderError::UnsupportedFormat { extension }),
        };
        tracing::debug!(path = %path.display(), "loaded language definition");
        Ok(Self {
            definition,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, LoaderError> {
        Ok(Self::from_definition(serde_yaml::from_str(text)?))
    }

    pub fn from_json_str(text: &str) -> std::result::Result<Self, LoaderError> {
        Ok(Self::from_definition(serde_json::from_str(text)?))
    }

    pub fn from_definition(definition: LanguageDefinition) -> Self {
        Self {
            definition,
            path: None,
        }
    }

    pub fn definition(&self) -> &LanguageDefinition {
        &self.definition
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Compile the definition into a ready-to-parse language
    pub fn into_language(self) -> Result<Language> {
        Language::new(&self.definition.lexicon(), self.definition.grammar())
    }
}
