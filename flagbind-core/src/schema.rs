//! Option schema builder.
//!
//! Reads the annotated fields of a destination record and produces the
//! lookup tables used by the binder: canonical name to field, short alias to
//! canonical name, and canonical name to default text.

use std::collections::HashMap;

use tracing::debug;

use crate::annotation::{Annotation, TagOption};
use crate::error::SchemaError;
use crate::field::{FieldDescriptor, ScalarKind, Slot};

const SHORT: &str = "short";
const DEFAULT: &str = "default";

/// One bindable option.
#[derive(Debug)]
pub struct OptionEntry<'a> {
    /// Canonical option name
    pub name: &'static str,

    /// Field the option writes to
    pub field: &'static str,

    pub kind: ScalarKind,

    /// Extra spelling registered with `short=`
    pub short: Option<&'static str>,

    /// Text applied when the option is never given
    pub default: Option<&'static str>,

    pub slot: Slot<'a>,
}

/// The set of options declared by a destination record.
#[derive(Debug)]
pub struct OptionSchema<'a> {
    entries: Vec<OptionEntry<'a>>,
    by_name: HashMap<&'static str, usize>,
    short_aliases: HashMap<&'static str, &'static str>,
    defaults: HashMap<&'static str, &'static str>,
}

impl<'a> OptionSchema<'a> {
    /// Build a schema from field descriptors.
    ///
    /// Fields without an annotation are skipped. Any invalid annotation
    /// fails the whole schema.
    pub fn build(fields: Vec<FieldDescriptor<'a>>) -> Result<Self, SchemaError> {
        let mut schema = Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
            short_aliases: HashMap::new(),
            defaults: HashMap::new(),
        };

        for field in fields {
            let Some(tag) = field.annotation else {
                continue;
            };

            let Some(kind) = field.slot.kind() else {
                return Err(SchemaError::UnsupportedFieldType {
                    field: field.name,
                    type_name: field.slot.type_name(),
                    annotation: tag,
                });
            };

            schema.add(field, kind, Annotation::parse(tag))?;
        }

        // An alias spelled like another option would make that option unreachable
        for (alias, target) in &schema.short_aliases {
            if alias != target && schema.by_name.contains_key(alias) {
                return Err(SchemaError::DuplicateShortAlias(alias.to_string()));
            }
        }

        Ok(schema)
    }

    fn add(
        &mut self,
        field: FieldDescriptor<'a>,
        kind: ScalarKind,
        annotation: Annotation<'static>,
    ) -> Result<(), SchemaError> {
        let name = annotation.name;
        if name.is_empty() {
            return Err(SchemaError::EmptyOptionName(field.name));
        }
        if self.by_name.contains_key(name) {
            return Err(SchemaError::DuplicateOption(name.to_string()));
        }

        let short = match annotation.option(SHORT) {
            None => None,
            Some(TagOption::Flag) => return Err(SchemaError::ShortMustHaveValue(name.to_string())),
            Some(TagOption::Value("")) => return Err(SchemaError::EmptyShortAlias(name.to_string())),
            Some(TagOption::Value(alias)) => Some(alias),
        };

        let default = match annotation.option(DEFAULT) {
            None => None,
            Some(TagOption::Flag) => return Err(SchemaError::DefaultMustHaveValue(name.to_string())),
            Some(TagOption::Value("")) => return Err(SchemaError::EmptyDefault(name.to_string())),
            Some(TagOption::Value(text)) => Some(text),
        };

        for key in annotation.unknown_keys(&[SHORT, DEFAULT]) {
            debug!(option = name, key, "ignoring unrecognized annotation option");
        }

        if let Some(alias) = short {
            if self.short_aliases.insert(alias, name).is_some() {
                return Err(SchemaError::DuplicateShortAlias(alias.to_string()));
            }
        }
        if let Some(text) = default {
            self.defaults.insert(name, text);
        }

        self.by_name.insert(name, self.entries.len());
        self.entries.push(OptionEntry {
            name,
            field: field.name,
            kind,
            short,
            default,
            slot: field.slot,
        });

        Ok(())
    }

    /// Map a key as typed on the command line to its canonical name.
    pub fn resolve<'k>(&self, key: &'k str) -> &'k str {
        match self.short_aliases.get(key) {
            Some(name) => *name,
            None => key,
        }
    }

    /// Position of the option named `name` in declaration order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Default text registered for `name`.
    pub fn default_for(&self, name: &str) -> Option<&'static str> {
        self.defaults.get(name).copied()
    }

    pub fn entries(&self) -> &[OptionEntry<'a>] {
        &self.entries
    }

    pub fn entry_mut(&mut self, index: usize) -> &mut OptionEntry<'a> {
        &mut self.entries[index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
