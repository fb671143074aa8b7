//! Core types and functionality for flagbind.
//!
//! This crate populates option records from command-line arguments. A record
//! describes its fields through [`Options`], each field carrying an annotation
//! such as `"debug,short=d"` or `"description,default=This is a test"`.
//! [`parse`] builds an [`OptionSchema`] from those annotations and binds the
//! arguments into the record.

mod annotation;
mod binder;
mod coerce;
mod error;
mod field;
mod schema;

// Re-export core types
pub use annotation::{Annotation, TagOption};
pub use binder::Binder;
pub use coerce::{parse_bool, parse_float, parse_signed, parse_unsigned, Float};
pub use error::{BindError, ConversionError, Error, NumericReason, Result, SchemaError};
pub use field::{FieldDescriptor, IntoSlot, Options, ScalarKind, Slot};
pub use schema::{OptionEntry, OptionSchema};

/// Populate `options` from `args` (the program name excluded).
///
/// Options given on the command line are written as they are scanned, then
/// defaults are applied to every option that was not given. On error the
/// record keeps whatever was written before the failing argument.
pub fn parse<S, O>(args: &[S], options: &mut O) -> Result<()>
where
    S: AsRef<str>,
    O: Options + ?Sized,
{
    let schema = OptionSchema::build(options.fields())?;
    Binder::new(schema).bind(args)?;
    Ok(())
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
