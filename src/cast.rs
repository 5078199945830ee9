//! Retrieval of erased values.
//!
//! Three flavors are offered, mirroring how much the caller already knows:
//!
//! - **Pointer form** ([`any_cast_ref`], [`any_cast_mut`]) returns `None` on a
//!   type mismatch or an empty container.
//! - **Value form** ([`any_cast`], [`any_cast_take`], [`try_any_cast_ref`],
//!   [`try_any_cast_mut`]) reports the same conditions as [`BadAnyCast`].
//! - **Unchecked form** ([`unsafe_any_cast_ptr`], [`unsafe_any_cast_ref`], ...)
//!   skips the identity check entirely. Use it only when the stored type is
//!   known by other means, e.g. when values cross a dynamic library boundary
//!   where [`TypeId`]s may not agree.
//!
//! ```
//! use smallany::SmallAny;
//! use smallany::cast::{any_cast, any_cast_ref};
//!
//! let any: SmallAny = SmallAny::new(String::from("hello"));
//!
//! assert_eq!(any_cast_ref::<String, _>(&any).map(String::as_str), Some("hello"));
//! assert!(any_cast_ref::<i32, _>(&any).is_none());
//!
//! assert_eq!(any_cast::<String, _>(&any).unwrap(), "hello");
//! assert!(any_cast::<i32, _>(&any).is_err());
//! ```

use core::any::TypeId;

use crate::erased::ErasedAny;
use crate::error::BadAnyCast;
use crate::type_info::TypeInfo;

/// Returns a reference to the value if it is a `T`.
#[inline]
pub fn any_cast_ref<T: 'static, A: ErasedAny + ?Sized>(any: &A) -> Option<&T> {
    let ptr = any.__cast_ptr(Some(TypeId::of::<T>()))?;
    // SAFETY: the manager confirmed the value is a `T`.
    Some(unsafe { ptr.cast::<T>().as_ref() })
}

/// Returns a mutable reference to the value if it is a `T`.
#[inline]
pub fn any_cast_mut<T: 'static, A: ErasedAny + ?Sized>(any: &mut A) -> Option<&mut T> {
    let ptr = any.__cast_mut_ptr(Some(TypeId::of::<T>()))?;
    // SAFETY: the manager confirmed the value is a `T`, and `any` is borrowed
    // mutably for the lifetime of the result.
    Some(unsafe { ptr.cast::<T>().as_mut() })
}

/// Returns a reference to the value, or [`BadAnyCast`] if it is not a `T`.
pub fn try_any_cast_ref<T: 'static, A: ErasedAny + ?Sized>(any: &A) -> Result<&T, BadAnyCast> {
    any_cast_ref(any).ok_or_else(|| mismatch::<T, A>(any))
}

/// Returns a mutable reference to the value, or [`BadAnyCast`] if it is not a
/// `T`.
pub fn try_any_cast_mut<T: 'static, A: ErasedAny + ?Sized>(any: &mut A) -> Result<&mut T, BadAnyCast> {
    match any.__cast_mut_ptr(Some(TypeId::of::<T>())) {
        // SAFETY: see `any_cast_mut`.
        Some(ptr) => Ok(unsafe { ptr.cast::<T>().as_mut() }),
        None => Err(mismatch::<T, A>(any)),
    }
}

/// Returns a clone of the value, or [`BadAnyCast`] if it is not a `T`.
pub fn any_cast<T: Clone + 'static, A: ErasedAny + ?Sized>(any: &A) -> Result<T, BadAnyCast> {
    try_any_cast_ref::<T, A>(any).cloned()
}

/// Moves the value out if it is a `T`, leaving the container empty.
///
/// On a mismatch the container keeps its value.
///
/// ```
/// use smallany::SmallAny;
/// use smallany::cast::any_cast_take;
///
/// let mut any: SmallAny = SmallAny::new(vec![1, 2, 3]);
///
/// assert!(any_cast_take::<String, _>(&mut any).is_err());
/// assert!(!any.is_empty());
///
/// assert_eq!(any_cast_take::<Vec<i32>, _>(&mut any).unwrap(), [1, 2, 3]);
/// assert!(any.is_empty());
/// ```
pub fn any_cast_take<T: 'static, A: ErasedAny>(any: &mut A) -> Result<T, BadAnyCast> {
    match any.__take_value::<T>() {
        Some(value) => Ok(value),
        None => Err(mismatch::<T, A>(any)),
    }
}

/// Returns a pointer to the stored value without checking its type.
///
/// The pointer is null only if the container is empty.
#[inline]
pub fn unsafe_any_cast_ptr<T, A: ErasedAny + ?Sized>(any: &A) -> *const T {
    match any.__cast_ptr(None) {
        Some(ptr) => ptr.as_ptr().cast_const().cast(),
        None => core::ptr::null(),
    }
}

/// Returns a mutable pointer to the stored value without checking its type.
///
/// The pointer is null only if the container is empty.
#[inline]
pub fn unsafe_any_cast_mut_ptr<T, A: ErasedAny + ?Sized>(any: &mut A) -> *mut T {
    match any.__cast_mut_ptr(None) {
        Some(ptr) => ptr.as_ptr().cast(),
        None => core::ptr::null_mut(),
    }
}

/// Returns a reference to the stored value without checking its type.
///
/// # Safety
///
/// The container must be non-empty and hold a value of exactly type `T`.
#[inline]
pub unsafe fn unsafe_any_cast_ref<T, A: ErasedAny + ?Sized>(any: &A) -> &T {
    debug_assert!(!any.is_empty(), "unchecked cast on an empty container");
    // SAFETY: guaranteed by the caller.
    unsafe { &*unsafe_any_cast_ptr::<T, A>(any) }
}

/// Returns a mutable reference to the stored value without checking its type.
///
/// # Safety
///
/// The container must be non-empty and hold a value of exactly type `T`.
#[inline]
pub unsafe fn unsafe_any_cast_mut<T, A: ErasedAny + ?Sized>(any: &mut A) -> &mut T {
    debug_assert!(!any.is_empty(), "unchecked cast on an empty container");
    // SAFETY: guaranteed by the caller.
    unsafe { &mut *unsafe_any_cast_mut_ptr::<T, A>(any) }
}

fn mismatch<T: 'static, A: ErasedAny + ?Sized>(any: &A) -> BadAnyCast {
    BadAnyCast::new(TypeInfo::of::<T>(), any.type_info())
}
