//! Coercion of caller-supplied identifiers into node labels.

/// Conversion into a node label.
///
/// Nodes in this crate are identified by string labels. Integers are
/// accepted as a convenience and coerce to their decimal form, so
/// `graph.add_node(1)` and `graph.add_node("1")` refer to the same node.
/// Anything else is rejected at compile time by the trait bound.
pub trait IntoLabel {
    fn into_label(self) -> String;
}

impl IntoLabel for String {
    fn into_label(self) -> String {
        self
    }
}

impl IntoLabel for &String {
    fn into_label(self) -> String {
        self.clone()
    }
}

impl IntoLabel for &str {
    fn into_label(self) -> String {
        self.to_owned()
    }
}

macro_rules! impl_into_label_for_int {
    ($($ty:ty),*) => {
        $(
            impl IntoLabel for $ty {
                fn into_label(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_into_label_for_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
