//! Translation of legacy qooxdoo type names into TypeScript types.
//!
//! Type strings in class metadata use the framework's documentation
//! vocabulary (`Boolean`, `Map`, `var`, `Widget`, `Array<String>`,
//! `qx.ui.core.Widget?`). [`TypeMapper::get_type`] rewrites them into
//! structural TypeScript:
//!
//! ```text
//! Boolean              -> boolean
//! Map                  -> Record<string, any>
//! Array                -> any[]
//! Array<String>        -> (string)[]
//! Promise<Widget>      -> globalThis.Promise<qx.ui.core.Widget>
//! qx.ui.core.Widget    -> globalThis.qx.ui.core.Widget   (when indexed)
//! Integer?             -> Integer
//! ```
//!
//! Translation is best effort. Names it does not know pass through unchanged,
//! and generic expressions are only understood one level deep. Translating an
//! already translated string returns it unchanged.

use qxdts_meta::{MetaIndex, TypeRef};
use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::limits::MAX_TYPE_REWRITE_PASSES;

/// The type used when nothing better is known.
pub const UNKNOWN_TYPE: &str = "any";

/// Extractor placeholder for "has a value but no declared type".
const NO_TYPE: &str = "[[ Function ]]";

pub struct TypeMapper<'a, I: MetaIndex + ?Sized> {
    meta_db: &'a I,
    mappings: &'a FxHashMap<String, String>,
}

impl<'a, I: MetaIndex + ?Sized> TypeMapper<'a, I> {
    pub fn new(meta_db: &'a I, mappings: &'a FxHashMap<String, String>) -> Self {
        Self { meta_db, mappings }
    }

    /// Translate a legacy type expression.
    pub fn get_type(&self, typename: &str) -> String {
        if typename.is_empty() || typename == NO_TYPE {
            return UNKNOWN_TYPE.to_string();
        }
        if typename == "Array" {
            return "any[]".to_string();
        }

        let mut name = self.apply_mappings(typename);

        // Nullability is not represented in the declarations.
        if let Some(pos) = name.find('?') {
            name.truncate(pos);
        }
        if name.is_empty() {
            return UNKNOWN_TYPE.to_string();
        }

        // Rooted at globalThis so a package named like a class segment
        // (`declare module qx.ui { ... }`) cannot shadow the reference.
        if self.is_global_class(&name) {
            return format!("globalThis.{name}");
        }

        rewrite_builtins(&name)
    }

    /// Translate an optional metadata type reference, `any` when absent.
    pub fn get_type_ref(&self, type_ref: Option<&TypeRef>) -> String {
        match type_ref.and_then(TypeRef::name) {
            Some(name) => self.get_type(name),
            None => UNKNOWN_TYPE.to_string(),
        }
    }

    fn apply_mappings(&self, typename: &str) -> String {
        let mut current = typename.to_string();
        for _ in 0..MAX_TYPE_REWRITE_PASSES {
            match substitute_once(&current, self.mappings) {
                Some(next) => {
                    trace!(from = %current, to = %next, "type mapping pass");
                    current = next;
                }
                None => return current,
            }
        }
        warn!(
            type_name = typename,
            result = %current,
            "type mapping did not settle, keeping last rewrite"
        );
        current
    }

    fn is_global_class(&self, name: &str) -> bool {
        let known = |candidate: &str| {
            candidate.contains('.') && self.meta_db.meta_data(candidate).is_some()
        };
        known(name) || (name.contains("[]") && known(&name.replace("[]", "")))
    }
}

// =============================================================================
// Tokenizer
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    /// A maximal run of `[A-Za-z0-9.]`; dotted names are a single word.
    Word,
    /// Any other single character.
    Punct,
}

#[derive(Debug, Clone, Copy)]
struct Token<'s> {
    kind: TokenKind,
    text: &'s str,
}

impl Token<'_> {
    fn is_punct(self) -> bool {
        self.kind == TokenKind::Punct
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '.'
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        let mut end = start + ch.len_utf8();
        let kind = if is_word_char(ch) {
            while let Some(&(idx, next)) = chars.peek() {
                if !is_word_char(next) {
                    break;
                }
                end = idx + next.len_utf8();
                chars.next();
            }
            TokenKind::Word
        } else {
            TokenKind::Punct
        };
        tokens.push(Token {
            kind,
            text: &input[start..end],
        });
    }
    tokens
}

/// A token names a type on its own: not the head of a generic and, for the
/// punctuation key `*`, not glued to a word.
fn is_standalone(token: Token<'_>, prev: Option<Token<'_>>, next: Option<Token<'_>>) -> bool {
    if next.is_some_and(|n| n.text == "<") {
        return false;
    }
    match token.kind {
        TokenKind::Word => true,
        TokenKind::Punct => prev.is_none_or(Token::is_punct) && next.is_none_or(Token::is_punct),
    }
}

/// One substitution pass; `None` when no token matched.
fn substitute_once(input: &str, mappings: &FxHashMap<String, String>) -> Option<String> {
    let tokens = tokenize(input);
    let mut out = String::with_capacity(input.len());
    let mut changed = false;

    for (i, &token) in tokens.iter().enumerate() {
        let prev = i.checked_sub(1).map(|j| tokens[j]);
        let next = tokens.get(i + 1).copied();
        if is_standalone(token, prev, next) {
            if let Some(replacement) = mappings.get(token.text) {
                out.push_str(replacement);
                changed = true;
                continue;
            }
        }
        out.push_str(token.text);
    }

    changed.then_some(out)
}

/// Rewrites that hold regardless of configuration: `Promise<` is rooted at
/// `globalThis`, `var` and `*` become `unknown`, and `Array<T>` becomes the
/// postfix form `(T)[]` (`T` runs to the first `>`).
fn rewrite_builtins(input: &str) -> String {
    let tokens = tokenize(input);
    let mut out = String::with_capacity(input.len() + 16);
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        let prev = i.checked_sub(1).map(|j| tokens[j]);
        let next = tokens.get(i + 1).copied();
        let opens_generic = next.is_some_and(|n| n.text == "<");

        match (token.kind, token.text) {
            (TokenKind::Word, "Promise") if opens_generic => out.push_str("globalThis.Promise"),
            (TokenKind::Word, "Array") if opens_generic => {
                let args = &tokens[i + 2..];
                if let Some(close) = args.iter().position(|t| t.text == ">") {
                    if close > 0 {
                        let inner: String = args[..close].iter().map(|t| t.text).collect();
                        out.push('(');
                        out.push_str(&rewrite_builtins(&inner));
                        out.push_str(")[]");
                        i += close + 3;
                        continue;
                    }
                }
                out.push_str(token.text);
            }
            (TokenKind::Word, "var") => out.push_str("unknown"),
            (TokenKind::Punct, "*")
                if prev.is_none_or(Token::is_punct) && next.is_none_or(Token::is_punct) =>
            {
                out.push_str("unknown")
            }
            _ => out.push_str(token.text),
        }
        i += 1;
    }

    out
}

#[cfg(test)]
#[path = "tests/type_mapper_tests.rs"]
mod tests;
