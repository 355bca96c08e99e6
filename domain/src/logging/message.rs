//! Message arguments and placeholder substitution.
//!
//! A message is a template such as `"user {0} did {1}"` plus positional
//! [`MessageArg`]s. Arguments are resolved only when a backend actually
//! prepares the message, so a lazy argument costs nothing on a call that no
//! backend admits.

use serde_json::Value;
use std::fmt;

/// Text substituted for a placeholder whose value is missing or null.
pub const UNDEFINED: &str = "undefined";

/// Custom conversion of a resolved value into its inline text.
pub type Stringifier<'a> = Box<dyn Fn(&Value) -> String + 'a>;

/// Deferred value, evaluated each time a backend prepares the message.
pub type Producer<'a> = Box<dyn Fn() -> Value + 'a>;

/// Per-argument options of the wrapped variants.
pub struct ArgOptions<'a> {
    /// Replaces the default string conversion.
    pub stringifier: Option<Stringifier<'a>>,
    /// Hand the value to the backend as a separate structured value instead
    /// of inlining it. Dumped values take no placeholder.
    pub dump: bool,
    /// Whether the argument takes part in `{n}` numbering.
    pub placeholder: bool,
}

impl Default for ArgOptions<'_> {
    fn default() -> Self {
        Self {
            stringifier: None,
            dump: false,
            placeholder: true,
        }
    }
}

impl fmt::Debug for ArgOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgOptions")
            .field("stringifier", &self.stringifier.is_some())
            .field("dump", &self.dump)
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

/// One positional argument of a message template.
pub enum MessageArg<'a> {
    Literal(Value),
    Lazy(Producer<'a>),
    WrappedValue {
        value: Value,
        options: ArgOptions<'a>,
    },
    WrappedLazy {
        producer: Producer<'a>,
        options: ArgOptions<'a>,
    },
}

impl<'a> MessageArg<'a> {
    pub fn value(value: impl Into<Value>) -> Self {
        MessageArg::Literal(value.into())
    }

    pub fn lazy(producer: impl Fn() -> Value + 'a) -> Self {
        MessageArg::Lazy(Box::new(producer))
    }

    /// Use `stringifier` instead of the default string conversion.
    pub fn with_stringifier(self, stringifier: impl Fn(&Value) -> String + 'a) -> Self {
        self.map_options(|options| options.stringifier = Some(Box::new(stringifier)))
    }

    /// Pass the value to the backend as a structured dump value.
    pub fn dump(self) -> Self {
        self.map_options(|options| options.dump = true)
    }

    /// Exclude the argument from placeholder numbering.
    pub fn without_placeholder(self) -> Self {
        self.map_options(|options| options.placeholder = false)
    }

    fn map_options(self, apply: impl FnOnce(&mut ArgOptions<'a>)) -> Self {
        let mut wrapped = match self {
            MessageArg::Literal(value) => MessageArg::WrappedValue {
                value,
                options: ArgOptions::default(),
            },
            MessageArg::Lazy(producer) => MessageArg::WrappedLazy {
                producer,
                options: ArgOptions::default(),
            },
            wrapped => wrapped,
        };
        if let MessageArg::WrappedValue { options, .. } | MessageArg::WrappedLazy { options, .. } =
            &mut wrapped
        {
            apply(options);
        }
        wrapped
    }

    pub fn options(&self) -> Option<&ArgOptions<'a>> {
        match self {
            MessageArg::WrappedValue { options, .. } | MessageArg::WrappedLazy { options, .. } => {
                Some(options)
            }
            MessageArg::Literal(_) | MessageArg::Lazy(_) => None,
        }
    }

    /// Current value of the argument, invoking the producer of lazy variants.
    pub fn resolve(&self) -> Value {
        match self {
            MessageArg::Literal(value) | MessageArg::WrappedValue { value, .. } => value.clone(),
            MessageArg::Lazy(producer) | MessageArg::WrappedLazy { producer, .. } => producer(),
        }
    }

    pub fn is_dump(&self) -> bool {
        self.options().is_some_and(|options| options.dump)
    }

    pub fn takes_placeholder(&self) -> bool {
        self.options()
            .is_none_or(|options| options.placeholder && !options.dump)
    }

    /// Inline text of `value`; `None` for null, which is never stringified.
    pub fn stringify(&self, value: &Value) -> Option<String> {
        if value.is_null() {
            return None;
        }
        let custom = self
            .options()
            .and_then(|options| options.stringifier.as_ref());
        Some(match (custom, value) {
            (Some(stringifier), value) => stringifier(value),
            (None, Value::String(text)) => text.clone(),
            (None, value) => value.to_string(),
        })
    }
}

impl fmt::Debug for MessageArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageArg::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            MessageArg::Lazy(_) => f.write_str("Lazy(..)"),
            MessageArg::WrappedValue { value, options } => f
                .debug_struct("WrappedValue")
                .field("value", value)
                .field("options", options)
                .finish(),
            MessageArg::WrappedLazy { options, .. } => f
                .debug_struct("WrappedLazy")
                .field("options", options)
                .finish_non_exhaustive(),
        }
    }
}

impl From<Value> for MessageArg<'_> {
    fn from(value: Value) -> Self {
        MessageArg::Literal(value)
    }
}

impl From<&str> for MessageArg<'_> {
    fn from(value: &str) -> Self {
        MessageArg::Literal(Value::from(value))
    }
}

impl From<String> for MessageArg<'_> {
    fn from(value: String) -> Self {
        MessageArg::Literal(Value::from(value))
    }
}

impl From<bool> for MessageArg<'_> {
    fn from(value: bool) -> Self {
        MessageArg::Literal(Value::from(value))
    }
}

impl From<i64> for MessageArg<'_> {
    fn from(value: i64) -> Self {
        MessageArg::Literal(Value::from(value))
    }
}

impl From<i32> for MessageArg<'_> {
    fn from(value: i32) -> Self {
        MessageArg::Literal(Value::from(value))
    }
}

impl From<u64> for MessageArg<'_> {
    fn from(value: u64) -> Self {
        MessageArg::Literal(Value::from(value))
    }
}

impl From<usize> for MessageArg<'_> {
    fn from(value: usize) -> Self {
        MessageArg::Literal(Value::from(value))
    }
}

impl From<f64> for MessageArg<'_> {
    fn from(value: f64) -> Self {
        MessageArg::Literal(Value::from(value))
    }
}

/// A template with its placeholders substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedMessage {
    pub message: String,
    /// Values of `dump` arguments, in argument order.
    pub dump_values: Vec<Value>,
}

/// Resolve every argument once and substitute `{n}` tokens in `template`.
///
/// The n-th argument taking a placeholder replaces every `{n}` token.
/// Tokens without a value (out of range, or null) become `"undefined"`.
/// Braces not forming a `{digits}` token are kept verbatim.
pub fn prepare_message(template: &str, args: &[MessageArg<'_>]) -> PreparedMessage {
    let resolved: Vec<(&MessageArg<'_>, Value)> =
        args.iter().map(|arg| (arg, arg.resolve())).collect();

    let substitutions: Vec<Option<String>> = resolved
        .iter()
        .filter(|(arg, _)| arg.takes_placeholder())
        .map(|(arg, value)| arg.stringify(value))
        .collect();

    let message = replace_placeholders(template, &substitutions);

    let dump_values = resolved
        .into_iter()
        .filter(|(arg, _)| arg.is_dump())
        .map(|(_, value)| value)
        .collect();

    PreparedMessage {
        message,
        dump_values,
    }
}

fn replace_placeholders(template: &str, substitutions: &[Option<String>]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();

        if digits > 0 && after[digits..].starts_with('}') {
            let text = after[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|index| substitutions.get(index))
                .and_then(|substitution| substitution.as_deref())
                .unwrap_or(UNDEFINED);
            output.push_str(text);
            rest = &after[digits + 1..];
        } else {
            output.push('{');
            rest = after;
        }
    }

    output.push_str(rest);
    output
}
