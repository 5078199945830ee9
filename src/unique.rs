use alloc::alloc::handle_alloc_error;

use crate::error::Error;
use crate::manager::MoveOnly;
use crate::raw::RawAny;
use crate::smallany::SmallAny;
use crate::space::S1;
use crate::sync::SyncAny;

/// A move-only [`SmallAny`].
///
/// `UniqueAny` accepts any `'static` value, including ones that cannot be
/// cloned, at the price of not being cloneable itself. Storage, type identity
/// and casts behave exactly as for [`SmallAny`].
///
/// # Example
///
/// ```
/// use smallany::UniqueAny;
/// use std::sync::Mutex;
///
/// let any: UniqueAny = UniqueAny::new(Mutex::new(1));
/// *any.downcast_ref::<Mutex<i32>>().unwrap().lock().unwrap() += 1;
///
/// let mutex = any.downcast::<Mutex<i32>>().unwrap();
/// assert_eq!(mutex.into_inner().unwrap(), 2);
/// ```
pub struct UniqueAny<Space = S1> {
    raw: RawAny<Space>,
}

impl_erased_any!(UniqueAny);

impl<Space> UniqueAny<Space> {
    /// Erases `value`, storing it inline if it fits `Space`.
    ///
    /// # Panics
    ///
    /// Aborts through [`handle_alloc_error`] if the value needs a heap block
    /// and the allocation fails. Use [`UniqueAny::try_new`] to handle that
    /// case.
    pub fn new<T: 'static>(value: T) -> UniqueAny<Space> {
        match RawAny::try_new::<T, MoveOnly>(value) {
            Ok(raw) => UniqueAny { raw },
            Err(layout) => handle_alloc_error(layout),
        }
    }

    /// Erases `value`, reporting a failed heap allocation instead of aborting.
    pub fn try_new<T: 'static>(value: T) -> Result<UniqueAny<Space>, Error> {
        RawAny::try_new::<T, MoveOnly>(value)
            .map(|raw| UniqueAny { raw })
            .map_err(Error::out_of_memory)
    }

    /// Replaces the stored value with `value`.
    ///
    /// The new value is erased into a temporary container first, so if that
    /// fails the old value is left in place.
    pub fn assign<T: 'static>(&mut self, value: T) {
        let mut incoming = UniqueAny::new(value);
        incoming.swap(self);
    }

    /// Like [`UniqueAny::assign`], but reports a failed heap allocation. The
    /// old value is kept in that case.
    pub fn try_assign<T: 'static>(&mut self, value: T) -> Result<(), Error> {
        let mut incoming = UniqueAny::try_new(value)?;
        incoming.swap(self);
        Ok(())
    }
}

/// Keeps the value where it is; only the ability to clone is given up.
impl<Space> From<SmallAny<Space>> for UniqueAny<Space> {
    fn from(mut any: SmallAny<Space>) -> UniqueAny<Space> {
        UniqueAny {
            raw: any.take_raw(),
        }
    }
}

impl<Space> From<SyncAny<Space>> for UniqueAny<Space> {
    fn from(mut any: SyncAny<Space>) -> UniqueAny<Space> {
        UniqueAny {
            raw: any.take_raw(),
        }
    }
}
