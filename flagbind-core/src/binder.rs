//! Argument binder.
//!
//! Walks the raw arguments left to right and writes each recognised option
//! into its field. Accepted spellings:
//! - `-name value`, `--name value`
//! - `-name=value`, `--name=value`
//! - `-flag`, `--flag` for boolean fields
//! - the registered short alias in place of the name
//!
//! There are no positional arguments. A token after an option is taken as its
//! value unless it starts with `-`, so negative numbers only work in the
//! `=` form.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::coerce;
use crate::error::BindError;
use crate::schema::OptionSchema;

/// Per-call scan state
struct ParseState<'s, S> {
    args: &'s [S],
    cursor: usize,
    /// Options not yet given on the command line
    pending: HashSet<&'static str>,
}

impl<'s, S: AsRef<str>> ParseState<'s, S> {
    fn new(args: &'s [S], schema: &OptionSchema<'_>) -> Self {
        Self {
            args,
            cursor: 0,
            pending: schema.entries().iter().map(|entry| entry.name).collect(),
        }
    }

    fn next_token(&mut self) -> Option<&'s str> {
        let token = self.args.get(self.cursor)?.as_ref();
        self.cursor += 1;
        Some(token)
    }

    /// Consume the following token if it can serve as a value.
    fn take_value(&mut self) -> Option<&'s str> {
        let candidate = self.args.get(self.cursor)?.as_ref();
        if candidate.starts_with('-') {
            return None;
        }
        self.cursor += 1;
        Some(candidate)
    }
}

/// Binds arguments into the fields of a built schema.
pub struct Binder<'a> {
    schema: OptionSchema<'a>,
}

impl<'a> Binder<'a> {
    pub fn new(schema: OptionSchema<'a>) -> Self {
        Self { schema }
    }

    /// Bind `args` (without the program name) and then apply defaults.
    ///
    /// Stops at the first error. Fields written before it keep their values.
    pub fn bind<S: AsRef<str>>(mut self, args: &[S]) -> Result<(), BindError> {
        let mut state = ParseState::new(args, &self.schema);

        while let Some(token) = state.next_token() {
            if !token.starts_with('-') {
                return Err(BindError::UnrecognizedBareToken(token.to_string()));
            }

            let (raw_key, value) = match token.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (token, state.take_value()),
            };

            let key = self.schema.resolve(raw_key.trim_start_matches('-'));
            let index = self
                .schema
                .index_of(key)
                .ok_or_else(|| BindError::UnknownOption(key.to_string()))?;

            let entry = self.schema.entry_mut(index);
            if value.is_none() && !entry.kind.is_bool() {
                return Err(BindError::MissingValue(entry.name.to_string()));
            }

            let text = value.unwrap_or("");
            coerce::assign(&mut entry.slot, text).map_err(|source| BindError::ValueConversion {
                option: entry.name.to_string(),
                value: text.to_string(),
                source,
            })?;

            trace!(option = entry.name, field = entry.field, "bound option");
            state.pending.remove(entry.name);
        }

        self.apply_defaults(&state.pending)
    }

    fn apply_defaults(&mut self, pending: &HashSet<&'static str>) -> Result<(), BindError> {
        for index in 0..self.schema.len() {
            let entry = self.schema.entry_mut(index);
            if !pending.contains(entry.name) {
                continue;
            }
            let Some(text) = entry.default else {
                continue;
            };

            coerce::assign(&mut entry.slot, text).map_err(|source| BindError::ValueConversion {
                option: entry.name.to_string(),
                value: text.to_string(),
                source,
            })?;
            debug!(option = entry.name, default = text, "applied default");
        }

        Ok(())
    }
}
