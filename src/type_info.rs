use core::any::{type_name, TypeId};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// Stand-in type reported by empty containers.
enum Empty {}

/// Identity token of an erased type.
///
/// Two tokens are equal iff they were produced for the same concrete type.
/// Equality is decided by [`TypeId`]; the type name is only carried along for
/// diagnostics.
///
/// `TypeId`s are unique within one compiled program. They are not guaranteed
/// to agree across independently compiled dynamic libraries, so a value
/// erased on one side of such a boundary may fail a checked cast on the
/// other. The unchecked casts exist for that situation.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Returns the token for `T`.
    pub fn of<T: ?Sized + 'static>() -> TypeInfo {
        TypeInfo {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the token reported by an empty container.
    ///
    /// No storable type compares equal to it.
    pub fn empty() -> TypeInfo {
        TypeInfo {
            id: TypeId::of::<Empty>(),
            name: "<empty>",
        }
    }

    /// Returns true if this is the token of an empty container.
    pub fn is_empty(&self) -> bool {
        self.id == TypeId::of::<Empty>()
    }

    /// Returns the underlying [`TypeId`].
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the name of the type, as given by [`core::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeInfo {
    #[inline]
    fn eq(&self, other: &TypeInfo) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl PartialEq<TypeId> for TypeInfo {
    #[inline]
    fn eq(&self, other: &TypeId) -> bool {
        self.id == *other
    }
}

impl PartialOrd for TypeInfo {
    #[inline]
    fn partial_cmp(&self, other: &TypeInfo) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    #[inline]
    fn cmp(&self, other: &TypeInfo) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("TypeInfo").field(&self.name).finish()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl From<TypeInfo> for TypeId {
    fn from(info: TypeInfo) -> TypeId {
        info.id
    }
}
