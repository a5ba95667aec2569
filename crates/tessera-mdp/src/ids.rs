use std::fmt::Debug;
use std::hash::Hash;

/// Opaque state or action identifier.
///
/// The engine only hashes and compares identifiers. `is_absent` marks the
/// one value a model may never use as a key.
pub trait Identifier: Clone + Eq + Hash + Debug {
    fn is_absent(&self) -> bool {
        false
    }

    /// Render the identifier for error messages. Strings render as-is, other
    /// identifiers in their `Debug` form.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl Identifier for String {
    fn is_absent(&self) -> bool {
        self.trim().is_empty()
    }

    fn describe(&self) -> String {
        self.clone()
    }
}

impl Identifier for &str {
    fn is_absent(&self) -> bool {
        self.trim().is_empty()
    }

    fn describe(&self) -> String {
        (*self).to_string()
    }
}

impl<T: Identifier> Identifier for Option<T> {
    fn is_absent(&self) -> bool {
        self.as_ref().is_none_or(Identifier::is_absent)
    }
}

macro_rules! never_absent {
    ($($ty:ty),*) => {
        $(impl Identifier for $ty {})*
    };
}

never_absent!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, char, bool);
