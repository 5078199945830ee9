use alloc::alloc::handle_alloc_error;

use crate::error::Error;
use crate::manager::Cloneable;
use crate::raw::RawAny;
use crate::space::S1;

/// A [`SmallAny`](crate::SmallAny) that can be sent to and shared between
/// threads.
///
/// Only values that are `Send + Sync` can be stored, which makes the
/// container itself `Send + Sync`. Everything else behaves exactly as for
/// `SmallAny`, and a `SyncAny` converts into a `SmallAny` or a
/// [`UniqueAny`](crate::UniqueAny) without re-erasing its value.
///
/// # Example
///
/// ```
/// use smallany::SyncAny;
/// use std::thread;
///
/// let message: SyncAny = SyncAny::new(42u32);
/// let handle = thread::spawn(move || message.downcast_ref::<u32>().copied());
/// assert_eq!(handle.join().unwrap(), Some(42));
/// ```
pub struct SyncAny<Space = S1> {
    raw: RawAny<Space>,
}

impl_erased_any!(SyncAny);

impl<Space> SyncAny<Space> {
    /// Erases `value`, storing it inline if it fits `Space`.
    ///
    /// # Panics
    ///
    /// Aborts through [`handle_alloc_error`] if the value needs a heap block
    /// and the allocation fails. Use [`SyncAny::try_new`] to handle that
    /// case.
    pub fn new<T: Clone + Send + Sync + 'static>(value: T) -> SyncAny<Space> {
        match RawAny::try_new::<T, Cloneable>(value) {
            Ok(raw) => SyncAny { raw },
            Err(layout) => handle_alloc_error(layout),
        }
    }

    /// Erases `value`, reporting a failed heap allocation instead of aborting.
    pub fn try_new<T: Clone + Send + Sync + 'static>(value: T) -> Result<SyncAny<Space>, Error> {
        RawAny::try_new::<T, Cloneable>(value)
            .map(|raw| SyncAny { raw })
            .map_err(Error::out_of_memory)
    }

    /// Replaces the stored value with `value`, keeping the old one if the
    /// new one cannot be erased.
    pub fn assign<T: Clone + Send + Sync + 'static>(&mut self, value: T) {
        let mut incoming = SyncAny::new(value);
        incoming.swap(self);
    }

    /// Like [`SyncAny::assign`], but reports a failed heap allocation.
    pub fn try_assign<T: Clone + Send + Sync + 'static>(&mut self, value: T) -> Result<(), Error> {
        let mut incoming = SyncAny::try_new(value)?;
        incoming.swap(self);
        Ok(())
    }

    /// Clones the container, reporting a failed heap allocation instead of
    /// aborting.
    pub fn try_clone(&self) -> Result<SyncAny<Space>, Error> {
        self.raw
            .try_clone()
            .map(|raw| SyncAny { raw })
            .map_err(Error::out_of_memory)
    }

    pub(crate) fn take_raw(&mut self) -> RawAny<Space> {
        self.raw.take()
    }
}

impl<Space> Clone for SyncAny<Space> {
    fn clone(&self) -> Self {
        match self.raw.try_clone() {
            Ok(raw) => SyncAny { raw },
            Err(layout) => handle_alloc_error(layout),
        }
    }

    /// If cloning panics, `self` keeps its old value.
    fn clone_from(&mut self, source: &Self) {
        let mut incoming = source.clone();
        incoming.swap(self);
    }
}

// Every constructor requires `Send + Sync`; `Space` is never instantiated.
unsafe impl<Space> Send for SyncAny<Space> {}
unsafe impl<Space> Sync for SyncAny<Space> {}
