//! Field discovery over options records.
//!
//! An options record is any type that can list its leaf fields through the
//! [`Options`] trait. Each leaf is reported as a [`FieldDescriptor`] holding a
//! mutable borrow of the field itself, so values written during resolution
//! land directly in the caller's record. Nested records are flattened by
//! splicing their own descriptors in place, depth first.
//!
//! Most records derive the trait:
//!
//! ```
//! use optbind::{Options, discover};
//!
//! #[derive(Default, Options)]
//! struct Tls {
//!     #[opt(desc = "certificate path")]
//!     cert_file: String,
//! }
//!
//! #[derive(Default, Options)]
//! struct Serve {
//!     #[opt(desc = "listen port", required = "true")]
//!     port: String,
//!     #[opt(flatten)]
//!     tls: Tls,
//!     log_level: String,
//! }
//!
//! let mut serve = Serve::default();
//! let idents: Vec<_> = discover(&mut serve).iter().map(|f| f.ident()).collect();
//! assert_eq!(idents, ["port", "cert_file", "log_level"]);
//! ```

/// Metadata and storage for one leaf field of an options record.
#[derive(Debug)]
pub struct FieldDescriptor<'a> {
    ident: &'static str,
    description: Option<&'static str>,
    required: Option<&'static str>,
    slot: &'a mut String,
}

impl<'a> FieldDescriptor<'a> {
    /// Describes the leaf `ident` stored in `slot`.
    #[must_use]
    pub const fn new(ident: &'static str, slot: &'a mut String) -> Self {
        Self {
            ident,
            description: None,
            required: None,
            slot,
        }
    }

    /// Attaches the human-readable description tag.
    #[must_use]
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Attaches the raw text of the `required` tag.
    ///
    /// The text is validated when the option set is built, not here.
    #[must_use]
    pub const fn with_required(mut self, required: &'static str) -> Self {
        self.required = Some(required);
        self
    }

    /// Identifier of the field as declared.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Description tag, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&'static str> {
        self.description
    }

    /// Raw `required` tag text, if any.
    #[must_use]
    pub const fn required_tag(&self) -> Option<&'static str> {
        self.required
    }

    /// Current contents of the field.
    #[must_use]
    pub fn current(&self) -> &str {
        self.slot.as_str()
    }

    pub(crate) fn into_slot(self) -> &'a mut String {
        self.slot
    }
}

/// Capability implemented by options records.
///
/// Implementations must report every leaf in declaration order and splice
/// nested records in where they are declared. `#[derive(Options)]` generates
/// exactly that.
pub trait Options {
    /// Lists the leaf fields of `self`, borrowing each one mutably.
    fn describe(&mut self) -> Vec<FieldDescriptor<'_>>;
}

impl Options for () {
    fn describe(&mut self) -> Vec<FieldDescriptor<'_>> {
        Vec::new()
    }
}

impl<T: Options + ?Sized> Options for &mut T {
    fn describe(&mut self) -> Vec<FieldDescriptor<'_>> {
        (**self).describe()
    }
}

impl<T: Options + ?Sized> Options for Box<T> {
    fn describe(&mut self) -> Vec<FieldDescriptor<'_>> {
        (**self).describe()
    }
}

/// Flattens `record` into its leaf field descriptors.
#[must_use]
pub fn discover(record: &mut dyn Options) -> Vec<FieldDescriptor<'_>> {
    record.describe()
}
