//! The untyped container shared by every erasure variant.
//!
//! [`RawAny`] owns one manager reference and one storage slot. It never looks
//! at the stored type itself: construction picks the manager, and destruction,
//! relocation, duplication, casts and type queries all go through it.

use core::alloc::Layout;
use core::any::TypeId;
use core::ptr::NonNull;

use crate::manager::{self, Content, Duplicate, Manager, Operation, Outcome};
use crate::type_info::TypeInfo;

/// Manager plus storage.
///
/// # Safety Invariant
///
/// `manager` is `None` iff the container is empty. When it is `Some`, it is
/// the manager that filled `content`, so dispatching any [`Operation`] to it
/// is sound.
pub(crate) struct RawAny<Space> {
    pub(crate) manager: Option<Manager<Space>>,
    pub(crate) content: Content<Space>,
}

impl<Space> RawAny<Space> {
    pub(crate) const fn empty() -> RawAny<Space> {
        RawAny {
            manager: None,
            content: Content::new(),
        }
    }

    /// Erases `value`, inline if it fits `Space`, on the heap otherwise.
    pub(crate) fn try_new<T: 'static, C: Duplicate<T>>(value: T) -> Result<RawAny<Space>, Layout> {
        let mut raw = RawAny::empty();
        manager::store::<T, Space>(&mut raw.content, value)?;
        raw.manager = Some(manager::select::<T, Space, C>());
        Ok(raw)
    }

    /// Duplicates the stored value into a new container.
    ///
    /// A panicking `Clone` leaves nothing behind: the copy is still empty when
    /// the panic unwinds through it.
    pub(crate) fn try_clone(&self) -> Result<RawAny<Space>, Layout> {
        let mut copy = RawAny::empty();
        if let Some(manager) = self.manager {
            // SAFETY: `manager` belongs to `self.content` and `copy` is empty.
            let outcome = unsafe {
                manager(Operation::Copy {
                    src: self,
                    dst: &mut copy,
                })
            };
            if let Outcome::OutOfMemory(layout) = outcome {
                return Err(layout);
            }
        }
        Ok(copy)
    }

    /// Moves the value out into a new container, leaving `self` empty.
    pub(crate) fn take(&mut self) -> RawAny<Space> {
        let mut dst = RawAny::empty();
        self.move_into(&mut dst);
        dst
    }

    /// Relocates the value of `self` into the empty `dst`.
    fn move_into(&mut self, dst: &mut RawAny<Space>) {
        debug_assert!(dst.manager.is_none());
        if let Some(manager) = self.manager {
            // SAFETY: `manager` belongs to `self.content` and `dst` is empty.
            unsafe { manager(Operation::Move { src: self, dst }) };
        }
    }

    /// Exchanges the values of two containers.
    ///
    /// Inline values are relocated through their manager rather than by
    /// swapping the raw bytes, so the value always passes through an owner
    /// that knows its type.
    pub(crate) fn swap(&mut self, other: &mut RawAny<Space>) {
        match (self.manager.is_some(), other.manager.is_some()) {
            (true, true) => {
                let mut scratch = RawAny::empty();
                other.move_into(&mut scratch);
                self.move_into(other);
                scratch.move_into(self);
            }
            (true, false) => self.move_into(other),
            (false, true) => other.move_into(self),
            (false, false) => {}
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.manager.is_none()
    }

    pub(crate) fn type_info(&self) -> TypeInfo {
        match self.manager {
            // SAFETY: TypeInfo does not touch the content.
            Some(manager) => unsafe { manager(Operation::TypeInfo) }.into_type_info(),
            None => TypeInfo::empty(),
        }
    }

    /// Pointer to the stored value.
    ///
    /// With `Some(requested)` the pointer is returned only if the stored type
    /// matches; with `None` the check is skipped. The pointer may only be
    /// read from.
    pub(crate) fn cast_ptr(&self, requested: Option<TypeId>) -> Option<NonNull<u8>> {
        let manager = self.manager?;
        dispatch_cast(manager, NonNull::from(&self.content), requested)
    }

    /// Like [`RawAny::cast_ptr`], but the pointer may be written through.
    pub(crate) fn cast_mut_ptr(&mut self, requested: Option<TypeId>) -> Option<NonNull<u8>> {
        let manager = self.manager?;
        dispatch_cast(manager, NonNull::from(&mut self.content), requested)
    }

    /// Returns true if the stored value lives in a heap block.
    pub(crate) fn is_heap(&self) -> bool {
        self.cast_ptr(None)
            .is_some_and(|ptr| ptr.as_ptr().cast_const() != self.content.addr())
    }

    /// Moves the value out if it is a `T`, leaving `self` empty. Leaves
    /// `self` untouched otherwise.
    pub(crate) fn take_value<T: 'static>(&mut self) -> Option<T> {
        let inline = self.content.addr();
        let ptr = self.cast_mut_ptr(Some(TypeId::of::<T>()))?.cast::<T>();
        // From here on the value is owned by this function.
        self.manager = None;
        if ptr.as_ptr().cast_const().cast::<u8>() == inline {
            // SAFETY: the type was checked above and the container no longer
            // drops the value.
            Some(unsafe { ptr.as_ptr().read() })
        } else {
            // SAFETY: as above; the heap block was produced by `store`.
            Some(unsafe { manager::take_boxed(ptr) })
        }
    }
}

fn dispatch_cast<Space>(
    manager: Manager<Space>,
    content: NonNull<Content<Space>>,
    requested: Option<TypeId>,
) -> Option<NonNull<u8>> {
    let op = match requested {
        Some(requested) => Operation::AnyCast { content, requested },
        None => Operation::UnsafeCast(content),
    };
    // SAFETY: callers pass the content that `manager` belongs to.
    unsafe { manager(op) }.into_pointer()
}

impl<Space> Drop for RawAny<Space> {
    fn drop(&mut self) {
        if let Some(manager) = self.manager.take() {
            // SAFETY: `manager` belongs to `self.content`, which is not used
            // again.
            unsafe { manager(Operation::Destroy(&mut self.content)) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RawAny;
    use crate::manager::{Cloneable, MoveOnly};
    use crate::space::*;
    use crate::TypeInfo;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::string::String;
    use std::vec::Vec;

    fn raw<T: Clone + 'static, Space>(value: T) -> RawAny<Space> {
        RawAny::try_new::<T, Cloneable>(value).unwrap()
    }

    #[test]
    fn test_empty() {
        let raw = RawAny::<S1>::empty();
        assert!(raw.is_empty());
        assert!(!raw.is_heap());
        assert!(raw.type_info().is_empty());
        assert!(raw.cast_ptr(None).is_none());
    }

    #[test]
    fn test_inline_and_heap() {
        let small = raw::<u32, S1>(7);
        assert!(!small.is_heap());
        let large = raw::<[u64; 3], S1>([1, 2, 3]);
        assert!(large.is_heap());
        let zst = raw::<(), S1>(());
        assert!(!zst.is_heap());
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut src = raw::<String, S1>(String::from("moved"));
        let heap_ptr = src.cast_ptr(None);
        let dst = src.take();
        assert!(src.is_empty());
        assert_eq!(dst.cast_ptr(None), heap_ptr);
        assert_eq!(dst.type_info(), TypeInfo::of::<String>());
    }

    #[test]
    fn test_swap_mixed_storage() {
        let mut a = raw::<u8, S1>(1);
        let mut b = raw::<Vec<u8>, S1>(vec![2, 3]);
        a.swap(&mut b);
        assert_eq!(a.type_info(), TypeInfo::of::<Vec<u8>>());
        assert_eq!(b.type_info(), TypeInfo::of::<u8>());

        let mut empty = RawAny::<S1>::empty();
        a.swap(&mut empty);
        assert!(a.is_empty());
        assert_eq!(empty.type_info(), TypeInfo::of::<Vec<u8>>());
    }

    #[test]
    fn test_take_value() {
        let mut inline = raw::<u16, S1>(9);
        assert_eq!(inline.take_value::<u32>(), None);
        assert!(!inline.is_empty());
        assert_eq!(inline.take_value::<u16>(), Some(9));
        assert!(inline.is_empty());

        let mut heap = raw::<[u32; 8], S1>([4; 8]);
        assert_eq!(heap.take_value::<[u32; 8]>(), Some([4; 8]));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_drop_once() {
        #[derive(Clone)]
        struct Counted(Rc<Cell<usize>>, [usize; 2]);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut a = raw::<Counted, S1>(Counted(Rc::clone(&drops), [0; 2]));
        let mut b = a.take();
        a.swap(&mut b);
        b.swap(&mut a);
        drop(a);
        assert_eq!(drops.get(), 0);
        drop(b);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_move_only_policy() {
        struct NotClone(u8);
        let raw = RawAny::<S1>::try_new::<NotClone, MoveOnly>(NotClone(3)).unwrap();
        let ptr = raw.cast_ptr(Some(std::any::TypeId::of::<NotClone>())).unwrap();
        assert_eq!(unsafe { ptr.cast::<NotClone>().as_ref() }.0, 3);
    }
}
