//! Destination record description.
//!
//! A record that wants to be populated from the command line implements
//! [`Options`] and lists its fields, each with a writable [`Slot`] and an
//! optional annotation in the option mini-language.

use std::fmt;

/// Scalar kind of a destination field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    /// Signed integer of the given bit width
    Int(u32),
    /// Unsigned integer of the given bit width
    Uint(u32),
    /// Floating point of the given bit width
    Float(u32),
    String,
}

impl ScalarKind {
    pub fn is_bool(self) -> bool {
        self == ScalarKind::Bool
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Bool => f.write_str("bool"),
            ScalarKind::Int(bits) => write!(f, "i{}", bits),
            ScalarKind::Uint(bits) => write!(f, "u{}", bits),
            ScalarKind::Float(bits) => write!(f, "f{}", bits),
            ScalarKind::String => f.write_str("string"),
        }
    }
}

/// Writable reference to a destination field.
#[derive(Debug)]
pub enum Slot<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    String(&'a mut String),
    /// A field whose type cannot hold an option value
    Unsupported { type_name: &'static str },
}

impl Slot<'_> {
    /// Kind of the referenced field, or `None` for unsupported fields.
    pub fn kind(&self) -> Option<ScalarKind> {
        let kind = match self {
            Slot::Bool(_) => ScalarKind::Bool,
            Slot::I8(_) => ScalarKind::Int(8),
            Slot::I16(_) => ScalarKind::Int(16),
            Slot::I32(_) => ScalarKind::Int(32),
            Slot::I64(_) => ScalarKind::Int(64),
            Slot::Isize(_) => ScalarKind::Int(isize::BITS),
            Slot::U8(_) => ScalarKind::Uint(8),
            Slot::U16(_) => ScalarKind::Uint(16),
            Slot::U32(_) => ScalarKind::Uint(32),
            Slot::U64(_) => ScalarKind::Uint(64),
            Slot::Usize(_) => ScalarKind::Uint(usize::BITS),
            Slot::F32(_) => ScalarKind::Float(32),
            Slot::F64(_) => ScalarKind::Float(64),
            Slot::String(_) => ScalarKind::String,
            Slot::Unsupported { .. } => return None,
        };
        Some(kind)
    }

    /// Rust type of the referenced field.
    pub fn type_name(&self) -> &'static str {
        match self {
            Slot::Bool(_) => "bool",
            Slot::I8(_) => "i8",
            Slot::I16(_) => "i16",
            Slot::I32(_) => "i32",
            Slot::I64(_) => "i64",
            Slot::Isize(_) => "isize",
            Slot::U8(_) => "u8",
            Slot::U16(_) => "u16",
            Slot::U32(_) => "u32",
            Slot::U64(_) => "u64",
            Slot::Usize(_) => "usize",
            Slot::F32(_) => "f32",
            Slot::F64(_) => "f64",
            Slot::String(_) => "String",
            Slot::Unsupported { type_name } => type_name,
        }
    }
}

/// Conversion from a mutable field reference into a [`Slot`].
pub trait IntoSlot<'a> {
    fn into_slot(self) -> Slot<'a>;
}

macro_rules! impl_into_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> IntoSlot<'a> for &'a mut $ty {
                fn into_slot(self) -> Slot<'a> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

impl_into_slot! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
}

/// One field of a destination record.
#[derive(Debug)]
pub struct FieldDescriptor<'a> {
    /// Name of the field in the record
    pub name: &'static str,

    /// Option annotation, e.g. `"debug,short=d"`
    pub annotation: Option<&'static str>,

    /// Where the bound value is written
    pub slot: Slot<'a>,
}

impl<'a> FieldDescriptor<'a> {
    /// Describe an unannotated scalar field.
    pub fn new(name: &'static str, slot: impl IntoSlot<'a>) -> Self {
        Self {
            name,
            annotation: None,
            slot: slot.into_slot(),
        }
    }

    /// Describe a field whose type is not a scalar.
    pub fn unsupported<T: ?Sized>(name: &'static str) -> Self {
        Self {
            name,
            annotation: None,
            slot: Slot::Unsupported {
                type_name: std::any::type_name::<T>(),
            },
        }
    }

    /// Attach an option annotation.
    pub fn annotated(mut self, annotation: &'static str) -> Self {
        self.annotation = Some(annotation);
        self
    }
}

/// A record that can be populated from command-line arguments.
///
/// Implementations return one descriptor per field, in declaration order:
///
/// ```
/// use flagbind_core::{FieldDescriptor, Options};
///
/// #[derive(Default)]
/// struct Opts {
///     verbose: bool,
///     level: u8,
/// }
///
/// impl Options for Opts {
///     fn fields(&mut self) -> Vec<FieldDescriptor<'_>> {
///         vec![
///             FieldDescriptor::new("verbose", &mut self.verbose).annotated("verbose,short=v"),
///             FieldDescriptor::new("level", &mut self.level).annotated("level,default=3"),
///         ]
///     }
/// }
///
/// let mut opts = Opts::default();
/// flagbind_core::parse(&["-v"], &mut opts).unwrap();
/// assert!(opts.verbose);
/// assert_eq!(opts.level, 3);
/// ```
pub trait Options {
    fn fields(&mut self) -> Vec<FieldDescriptor<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_kinds_follow_field_types() {
        let mut flag = false;
        let mut small = 0i8;
        let mut size = 0usize;
        let mut ratio = 0f32;
        let mut text = String::new();

        assert_eq!(FieldDescriptor::new("flag", &mut flag).slot.kind(), Some(ScalarKind::Bool));
        assert_eq!(FieldDescriptor::new("small", &mut small).slot.kind(), Some(ScalarKind::Int(8)));
        assert_eq!(
            FieldDescriptor::new("size", &mut size).slot.kind(),
            Some(ScalarKind::Uint(usize::BITS))
        );
        assert_eq!(FieldDescriptor::new("ratio", &mut ratio).slot.kind(), Some(ScalarKind::Float(32)));
        assert_eq!(FieldDescriptor::new("text", &mut text).slot.kind(), Some(ScalarKind::String));
    }

    #[test]
    fn unsupported_fields_have_no_kind() {
        let field = FieldDescriptor::unsupported::<Vec<String>>("tags").annotated("tags");
        assert_eq!(field.slot.kind(), None);
        assert_eq!(field.annotation, Some("tags"));
        match field.slot {
            Slot::Unsupported { type_name } => assert!(type_name.contains("Vec")),
            other => panic!("unexpected slot {:?}", other),
        }
    }
}
