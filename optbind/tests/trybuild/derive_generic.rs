//! Generic records with borrowed inner records derive `Options`.

use optbind::{FieldDescriptor, Options};

/// Wraps any options record and adds a trace identifier.
#[derive(Options)]
struct Traced<'a, T>
where
    T: Options,
{
    #[opt(flatten)]
    inner: &'a mut T,
    trace_id: String,
}

#[derive(Default, Options)]
struct Leaf {
    r#match: String,
}

fn main() {
    let mut leaf = Leaf::default();
    let mut traced = Traced {
        inner: &mut leaf,
        trace_id: String::new(),
    };
    let fields: Vec<FieldDescriptor<'_>> = traced.describe();
    assert_eq!(fields.len(), 2);
}
