use core::any::TypeId;
use core::ptr::NonNull;

use crate::type_info::TypeInfo;

mod sealed {
    pub trait Sealed {}
}

pub(crate) use sealed::Sealed;

/// Behavior shared by every erasure container of this crate.
///
/// All containers report identity through the same [`TypeInfo`], so a value
/// erased in a [`SmallAny`](crate::SmallAny) and one erased in a
/// [`UniqueAny`](crate::UniqueAny) compare the same way, and the functions in
/// [`cast`](crate::cast) work on either.
///
/// This trait is sealed and cannot be implemented outside this crate.
///
/// ```
/// use smallany::{ErasedAny, SmallAny, UniqueAny};
///
/// let copyable: SmallAny = SmallAny::new(1u8);
/// let unique: UniqueAny = UniqueAny::new(2u8);
///
/// let all: [&dyn ErasedAny; 2] = [&copyable, &unique];
/// assert!(all.iter().all(|any| any.type_info() == copyable.type_info()));
/// ```
pub trait ErasedAny: Sealed {
    /// Identity of the stored type, or [`TypeInfo::empty`].
    fn type_info(&self) -> TypeInfo;

    /// Returns true if no value is stored.
    fn is_empty(&self) -> bool;

    /// Returns true if the stored value is a `T`.
    fn is<T: 'static>(&self) -> bool
    where
        Self: Sized,
    {
        self.type_info() == TypeId::of::<T>()
    }

    #[doc(hidden)]
    fn __cast_ptr(&self, requested: Option<TypeId>) -> Option<NonNull<u8>>;

    #[doc(hidden)]
    fn __cast_mut_ptr(&mut self, requested: Option<TypeId>) -> Option<NonNull<u8>>;

    #[doc(hidden)]
    fn __take_value<T: 'static>(&mut self) -> Option<T>
    where
        Self: Sized;
}
