use alloc::alloc::handle_alloc_error;

use crate::error::Error;
use crate::manager::Cloneable;
use crate::raw::RawAny;
use crate::space::S1;
use crate::sync::SyncAny;

/// A type-erased value that is stored inline or on the heap depending on its
/// size.
///
/// `SmallAny` holds at most one value of any `Clone + 'static` type. Values
/// whose size and alignment fit `Space` are stored inside the container
/// itself; larger ones are moved into a heap block. The default space is one
/// machine word, so integers, references, `Box`es and other pointer-sized
/// values never allocate.
///
/// The container can be cloned, which clones the stored value, and can be
/// queried for the stored type and downcast back to it.
///
/// # Example
///
/// ```
/// use smallany::{SmallAny, TypeInfo};
///
/// let mut values: Vec<SmallAny> = vec![
///     SmallAny::new(42i32),
///     SmallAny::new(String::from("hello")),
///     SmallAny::empty(),
/// ];
///
/// assert_eq!(values[0].downcast_ref::<i32>(), Some(&42));
/// assert_eq!(values[1].type_info(), TypeInfo::of::<String>());
/// assert!(values[2].is_empty());
///
/// values[2] = values[0].clone();
/// *values[2].downcast_mut::<i32>().unwrap() += 1;
/// assert_eq!(values[0].downcast_ref::<i32>(), Some(&42));
/// assert_eq!(values[2].downcast_ref::<i32>(), Some(&43));
/// ```
pub struct SmallAny<Space = S1> {
    raw: RawAny<Space>,
}

impl_erased_any!(SmallAny);

impl<Space> SmallAny<Space> {
    /// Erases `value`, storing it inline if it fits `Space`.
    ///
    /// # Example
    ///
    /// ```
    /// use smallany::SmallAny;
    /// use smallany::space::S4;
    ///
    /// let small: SmallAny<S4> = SmallAny::new([0usize; 2]);
    /// let large: SmallAny<S4> = SmallAny::new([1usize; 8]);
    ///
    /// assert!(!small.is_heap());
    /// assert!(large.is_heap());
    /// assert_eq!(large.downcast_ref::<[usize; 8]>().unwrap()[7], 1);
    /// ```
    ///
    /// # Panics
    ///
    /// Aborts through [`handle_alloc_error`] if the value needs a heap block
    /// and the allocation fails. Use [`SmallAny::try_new`] to handle that
    /// case.
    pub fn new<T: Clone + 'static>(value: T) -> SmallAny<Space> {
        match RawAny::try_new::<T, Cloneable>(value) {
            Ok(raw) => SmallAny { raw },
            Err(layout) => handle_alloc_error(layout),
        }
    }

    /// Erases `value`, reporting a failed heap allocation instead of aborting.
    pub fn try_new<T: Clone + 'static>(value: T) -> Result<SmallAny<Space>, Error> {
        RawAny::try_new::<T, Cloneable>(value)
            .map(|raw| SmallAny { raw })
            .map_err(Error::out_of_memory)
    }

    /// Replaces the stored value with `value`.
    ///
    /// The new value is erased into a temporary container first, so if that
    /// fails the old value is left in place.
    ///
    /// Passing a `SmallAny` here stores the container itself as the value; use
    /// [`Clone::clone_from`] or [`SmallAny::assign_from`] to adopt another
    /// container's value instead.
    pub fn assign<T: Clone + 'static>(&mut self, value: T) {
        let mut incoming = SmallAny::new(value);
        incoming.swap(self);
    }

    /// Like [`SmallAny::assign`], but reports a failed heap allocation. The
    /// old value is kept in that case.
    pub fn try_assign<T: Clone + 'static>(&mut self, value: T) -> Result<(), Error> {
        let mut incoming = SmallAny::try_new(value)?;
        incoming.swap(self);
        Ok(())
    }

    /// Clones the container, reporting a failed heap allocation instead of
    /// aborting.
    pub fn try_clone(&self) -> Result<SmallAny<Space>, Error> {
        self.raw
            .try_clone()
            .map(|raw| SmallAny { raw })
            .map_err(Error::out_of_memory)
    }

    pub(crate) fn take_raw(&mut self) -> RawAny<Space> {
        self.raw.take()
    }
}

impl<Space> Clone for SmallAny<Space> {
    fn clone(&self) -> Self {
        match self.raw.try_clone() {
            Ok(raw) => SmallAny { raw },
            Err(layout) => handle_alloc_error(layout),
        }
    }

    /// Replaces the value of `self` with a clone of `source`'s.
    ///
    /// If cloning panics, `self` keeps its old value.
    fn clone_from(&mut self, source: &Self) {
        let mut incoming = source.clone();
        incoming.swap(self);
    }
}

/// Keeps the value where it is; only the thread-safety guarantee is given up.
impl<Space> From<SyncAny<Space>> for SmallAny<Space> {
    fn from(mut any: SyncAny<Space>) -> SmallAny<Space> {
        SmallAny {
            raw: any.take_raw(),
        }
    }
}
