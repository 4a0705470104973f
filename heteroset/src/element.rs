use std::any::Any;
use std::fmt;

/// Stable identity of a storable type: the module that defines it and its
/// unqualified name.
///
/// Keys order by module path first and type name second, both compared
/// byte-wise, so a prefix sorts before every string extending it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey {
    module: &'static str,
    name: &'static str,
}

impl TypeKey {
    pub const fn new(module: &'static str, name: &'static str) -> Self {
        Self { module, name }
    }

    pub const fn module(&self) -> &'static str {
        self.module
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.name)
    }
}

/// Builds the [`TypeKey`] of a type named by a path relative to the calling
/// module.
///
/// `type_key!(Thing)` keys `Thing` under the calling module, while
/// `type_key!(inner::Thing)` keys it under `<calling module>::inner`, the
/// module that declares it.
#[macro_export]
macro_rules! type_key {
    (@path [$($module:tt)*] $name:ident) => {
        $crate::TypeKey::new(concat!($($module)*), stringify!($name))
    };
    (@path [$($module:tt)*] $head:ident :: $($rest:ident)::+) => {
        $crate::type_key!(@path [$($module)*, "::", stringify!($head)] $($rest)::+)
    };
    ($name:ident) => {
        $crate::TypeKey::new(module_path!(), stringify!($name))
    };
    ($head:ident :: $($rest:ident)::+) => {
        $crate::type_key!(@path [module_path!(), "::", stringify!($head)] $($rest)::+)
    };
}

/// A value that can live in a [`crate::HeteroSet`].
///
/// `less` must be a strict weak order:
/// - `a.less(b)` implies `!b.less(a)`
/// - `a.less(b) && b.less(c)` implies `a.less(c)`
/// - `!a.less(b) && !b.less(a)` means `a` and `b` are the same member
///
/// It is only ever called with two values of the implementing type; values
/// of different types are ordered by [`Element::TYPE_KEY`] alone.
pub trait Element: fmt::Debug + 'static {
    /// Must be unique per type; [`type_key!`] derives one from the module
    /// path and type name.
    const TYPE_KEY: TypeKey;

    fn less(&self, other: &Self) -> bool;
}

/// Object-safe view of an [`Element`], implemented for every element type.
pub trait AnyElement: fmt::Debug + 'static {
    fn type_key(&self) -> TypeKey;

    fn as_any(&self) -> &dyn Any;

    /// `self.less(other)` when `other` has the same concrete type, `false`
    /// otherwise.
    fn less_than(&self, other: &dyn AnyElement) -> bool;
}

impl<T: Element> AnyElement for T {
    #[inline]
    fn type_key(&self) -> TypeKey {
        T::TYPE_KEY
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn less_than(&self, other: &dyn AnyElement) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self.less(other))
    }
}

impl dyn AnyElement {
    pub fn is<T: Element>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Element>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Implements [`Element`] for types that already have a total order. Each
/// type is given as a path relative to the calling module and keyed as in
/// [`type_key!`].
#[macro_export]
macro_rules! impl_element {
    ($($($seg:ident)::+),+ $(,)?) => {
        $(
            impl $crate::Element for $($seg)::+ {
                const TYPE_KEY: $crate::TypeKey = $crate::type_key!($($seg)::+);

                fn less(&self, other: &Self) -> bool {
                    self < other
                }
            }
        )+
    };
}

macro_rules! impl_std_element {
    ($($t:ty),+) => {
        $(
            impl Element for $t {
                const TYPE_KEY: TypeKey = TypeKey::new("std", stringify!($t));

                fn less(&self, other: &Self) -> bool {
                    self < other
                }
            }
        )+
    };
}

impl_std_element!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char);

impl Element for String {
    const TYPE_KEY: TypeKey = TypeKey::new("std::string", "String");

    fn less(&self, other: &Self) -> bool {
        self < other
    }
}

impl Element for &'static str {
    const TYPE_KEY: TypeKey = TypeKey::new("std", "str");

    fn less(&self, other: &Self) -> bool {
        self < other
    }
}

// IEEE total order, so NaN gets a place instead of breaking the set.
impl Element for f32 {
    const TYPE_KEY: TypeKey = TypeKey::new("std", "f32");

    fn less(&self, other: &Self) -> bool {
        self.total_cmp(other).is_lt()
    }
}

impl Element for f64 {
    const TYPE_KEY: TypeKey = TypeKey::new("std", "f64");

    fn less(&self, other: &Self) -> bool {
        self.total_cmp(other).is_lt()
    }
}
