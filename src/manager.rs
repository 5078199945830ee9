//! Per-type managers.
//!
//! A manager is a single function, monomorphized for one concrete value type,
//! that knows how to destroy, relocate, duplicate and identify the value held
//! by a [`RawAny`]. The container only stores a pointer to its manager and
//! dispatches every type-dependent operation through it with an
//! [`Operation`] tag.
//!
//! Two families exist. [`small_manager`] treats [`Content`] as an inline
//! buffer holding the value itself, [`large_manager`] treats it as a pointer to
//! a heap block. Which one a container uses is decided once, by
//! [`fits_inline`], when the value is stored.
//!
//! # Safety Invariant
//!
//! A manager may only be invoked on content that was initialized by
//! [`store`] for the same `T` and `Space`, or by a Move or Copy of the same
//! manager. [`RawAny`] upholds this by installing the manager returned by
//! [`select`] in the same step that fills its content.

use alloc::alloc::alloc as allocate_raw;
use alloc::boxed::Box;
use core::alloc::Layout;
use core::any::{type_name, TypeId};
use core::mem::{self, ManuallyDrop, MaybeUninit};
use core::ptr::{self, NonNull};

use crate::raw::RawAny;
use crate::type_info::TypeInfo;

/// Dispatch function installed in a non-empty container.
pub(crate) type Manager<Space> = unsafe fn(Operation<'_, Space>) -> Outcome;

/// Storage slot of a container.
///
/// Which field is meaningful is decided by the installed manager alone.
#[repr(C)]
pub(crate) union Content<Space> {
    // Only sizes and aligns the union; accessed through `small`/`small_mut`.
    #[allow(dead_code)]
    small: ManuallyDrop<MaybeUninit<Space>>,
    large: *mut u8,
}

impl<Space> Content<Space> {
    pub(crate) const fn new() -> Content<Space> {
        Content {
            large: ptr::null_mut(),
        }
    }

    /// Address of the inline buffer.
    pub(crate) fn addr(&self) -> *const u8 {
        ptr::from_ref(self).cast()
    }

    fn small<T>(&self) -> *const T {
        ptr::from_ref(self).cast()
    }

    fn small_mut<T>(&mut self) -> *mut T {
        ptr::from_mut(self).cast()
    }

    /// # Safety
    ///
    /// The content must have been filled by the heap path of [`store`].
    unsafe fn large<T>(&self) -> *mut T {
        unsafe { self.large }.cast()
    }
}

/// Operation tag, with the operands it acts on.
pub(crate) enum Operation<'a, Space> {
    /// Drop the value and release its heap block, if any.
    Destroy(&'a mut Content<Space>),
    /// Relocate the value from `src` into the empty `dst`, leaving `src` empty.
    Move {
        src: &'a mut RawAny<Space>,
        dst: &'a mut RawAny<Space>,
    },
    /// Clone the value of `src` into the empty `dst`.
    Copy {
        src: &'a RawAny<Space>,
        dst: &'a mut RawAny<Space>,
    },
    /// Pointer to the value if it is of the `requested` type.
    AnyCast {
        content: NonNull<Content<Space>>,
        requested: TypeId,
    },
    /// Pointer to the value, unchecked.
    UnsafeCast(NonNull<Content<Space>>),
    /// Identity of the stored type.
    TypeInfo,
}

/// Answer of a manager.
pub(crate) enum Outcome {
    Done,
    Found(Option<NonNull<u8>>),
    Type(TypeInfo),
    OutOfMemory(Layout),
}

impl Outcome {
    pub(crate) fn into_pointer(self) -> Option<NonNull<u8>> {
        match self {
            Outcome::Found(ptr) => ptr,
            _ => None,
        }
    }

    pub(crate) fn into_type_info(self) -> TypeInfo {
        match self {
            Outcome::Type(info) => info,
            _ => TypeInfo::empty(),
        }
    }
}

/// How a manager duplicates values on Copy.
pub(crate) trait Duplicate<T> {
    const CLONE: Option<fn(&T) -> T>;
}

/// Policy of containers that require `Clone`.
pub(crate) enum Cloneable {}

/// Policy of move-only containers; Copy is never dispatched for them.
///
/// This holds because `UniqueAny` has no `Clone` impl and no conversion turns
/// a move-only container back into a cloneable one. Adding either would make
/// [`duplicate`] reachable for this policy.
pub(crate) enum MoveOnly {}

impl<T: Clone> Duplicate<T> for Cloneable {
    const CLONE: Option<fn(&T) -> T> = Some(<T as Clone>::clone);
}

impl<T> Duplicate<T> for MoveOnly {
    const CLONE: Option<fn(&T) -> T> = None;
}

fn duplicate<T, C: Duplicate<T>>(value: &T) -> T {
    match C::CLONE {
        Some(clone) => clone(value),
        None => unreachable!("move-only value of type `{}` was copied", type_name::<T>()),
    }
}

/// Returns true if a `T` can live in the inline buffer of `Space`.
///
/// Moves are plain memory copies in Rust and cannot fail, so only size and
/// alignment matter.
pub(crate) const fn fits_inline<T, Space>() -> bool {
    mem::size_of::<T>() <= mem::size_of::<Space>()
        && mem::align_of::<T>() <= mem::align_of::<Space>()
}

/// Returns the manager for `T` stored in `Space`.
pub(crate) fn select<T: 'static, Space, C: Duplicate<T>>() -> Manager<Space> {
    if const { fits_inline::<T, Space>() } {
        small_manager::<T, Space, C>
    } else {
        large_manager::<T, Space, C>
    }
}

/// Writes `value` into `content` where the manager from [`select`] expects it.
///
/// Returns the layout of the heap block if it could not be allocated; `value`
/// is dropped in that case.
pub(crate) fn store<T, Space>(content: &mut Content<Space>, value: T) -> Result<(), Layout> {
    if const { fits_inline::<T, Space>() } {
        // SAFETY: `T` fits the size and alignment of the inline buffer, which
        // sits at offset zero of the `repr(C)` union.
        unsafe { content.small_mut::<T>().write(value) };
    } else {
        log_event!(
            trace,
            value_type = type_name::<T>(),
            size = mem::size_of::<T>(),
            align = mem::align_of::<T>(),
            "value does not fit inline, storing on the heap"
        );
        let block = allocate::<T>()?;
        // SAFETY: `block` is a fresh allocation with the layout of `T`.
        unsafe { block.as_ptr().write(value) };
        content.large = block.as_ptr().cast();
    }
    Ok(())
}

/// Allocates a block with the layout of `T`, the same way `Box` does, so the
/// block can be released with `Box::from_raw`.
fn allocate<T>() -> Result<NonNull<T>, Layout> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }
    // SAFETY: the layout has a non-zero size.
    let ptr = unsafe { allocate_raw(layout) };
    NonNull::new(ptr.cast::<T>()).ok_or(layout)
}

/// Frees a heap block produced by [`store`] after moving its value out.
///
/// # Safety
///
/// `ptr` must come from [`store`] for the same `T` and must not be used again.
pub(crate) unsafe fn take_boxed<T>(ptr: NonNull<T>) -> T {
    // SAFETY: the block was allocated with `Layout::new::<T>()` by the global
    // allocator, which is exactly what `Box<T>` owns.
    *unsafe { Box::from_raw(ptr.as_ptr()) }
}

/// Manager for values stored inline.
///
/// # Safety
///
/// See the module-level safety invariant.
unsafe fn small_manager<T: 'static, Space, C: Duplicate<T>>(op: Operation<'_, Space>) -> Outcome {
    match op {
        Operation::Destroy(content) => {
            // SAFETY: the inline buffer holds an initialized `T`.
            unsafe { ptr::drop_in_place(content.small_mut::<T>()) };
        }
        Operation::Move { src, dst } => {
            // SAFETY: `src` holds a `T` inline and `dst` is empty. Clearing
            // the source manager below hands ownership to `dst`.
            unsafe { ptr::copy_nonoverlapping(src.content.small::<T>(), dst.content.small_mut::<T>(), 1) };
            dst.manager = src.manager.take();
        }
        Operation::Copy { src, dst } => {
            // SAFETY: `src` holds a `T` inline.
            let value = duplicate::<T, C>(unsafe { &*src.content.small::<T>() });
            // SAFETY: `dst` is empty and `T` fits its inline buffer.
            unsafe { dst.content.small_mut::<T>().write(value) };
            dst.manager = src.manager;
        }
        Operation::AnyCast { content, requested } => {
            return Outcome::Found((requested == TypeId::of::<T>()).then(|| content.cast()));
        }
        Operation::UnsafeCast(content) => return Outcome::Found(Some(content.cast())),
        Operation::TypeInfo => return Outcome::Type(TypeInfo::of::<T>()),
    }
    Outcome::Done
}

/// Manager for values stored on the heap.
///
/// # Safety
///
/// See the module-level safety invariant.
unsafe fn large_manager<T: 'static, Space, C: Duplicate<T>>(op: Operation<'_, Space>) -> Outcome {
    match op {
        Operation::Destroy(content) => {
            // SAFETY: the content points to a live heap block of `T`, which is
            // released here and never touched again.
            drop(unsafe { Box::from_raw(content.large::<T>()) });
        }
        Operation::Move { src, dst } => {
            // SAFETY: reading the pointer member is what the heap path wrote.
            dst.content.large = unsafe { src.content.large };
            src.content.large = ptr::null_mut();
            dst.manager = src.manager.take();
        }
        Operation::Copy { src, dst } => {
            // SAFETY: the source content points to a live `T`.
            let value = duplicate::<T, C>(unsafe { &*src.content.large::<T>() });
            match allocate::<T>() {
                Ok(block) => {
                    // SAFETY: `block` is a fresh allocation with the layout of `T`.
                    unsafe { block.as_ptr().write(value) };
                    dst.content.large = block.as_ptr().cast();
                    dst.manager = src.manager;
                }
                Err(layout) => return Outcome::OutOfMemory(layout),
            }
        }
        Operation::AnyCast { content, requested } => {
            if requested != TypeId::of::<T>() {
                return Outcome::Found(None);
            }
            // SAFETY: the content holds a heap pointer to a live `T`.
            return Outcome::Found(NonNull::new(unsafe { (*content.as_ptr()).large }));
        }
        Operation::UnsafeCast(content) => {
            // SAFETY: as above.
            return Outcome::Found(NonNull::new(unsafe { (*content.as_ptr()).large }));
        }
        Operation::TypeInfo => return Outcome::Type(TypeInfo::of::<T>()),
    }
    Outcome::Done
}
