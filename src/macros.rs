/// Emits a `tracing` event when the `tracing` feature is enabled, and
/// nothing otherwise.
macro_rules! log_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            tracing::$level!($($arg)+);
        }
    };
}

/// Implements the part of a container's API that does not depend on whether
/// its values can be cloned.
///
/// The container must be a struct `$name<Space>` with a single field
/// `raw: RawAny<Space>`.
macro_rules! impl_erased_any {
    ($name:ident) => {
        impl<Space> $name<Space> {
            /// Creates an empty container.
            #[inline]
            pub const fn empty() -> Self {
                $name {
                    raw: $crate::raw::RawAny::empty(),
                }
            }

            /// Returns true if no value is stored.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.raw.is_empty()
            }

            /// Drops the stored value, if any, leaving the container empty.
            pub fn clear(&mut self) {
                Self::empty().swap(self);
            }

            /// Identity of the stored type, or [`TypeInfo::empty`] if the
            /// container is empty.
            ///
            /// [`TypeInfo::empty`]: crate::TypeInfo::empty
            #[inline]
            pub fn type_info(&self) -> $crate::TypeInfo {
                self.raw.type_info()
            }

            /// Returns true if the stored value is a `T`.
            #[inline]
            pub fn is<T: 'static>(&self) -> bool {
                self.type_info() == core::any::TypeId::of::<T>()
            }

            /// Returns true if the stored value lives on the heap because it
            /// does not fit the inline space.
            pub fn is_heap(&self) -> bool {
                self.raw.is_heap()
            }

            /// Exchanges the values of `self` and `other`.
            pub fn swap(&mut self, other: &mut Self) {
                self.raw.swap(&mut other.raw);
            }

            /// Moves the value into a new container, leaving `self` empty.
            pub fn take(&mut self) -> Self {
                $name {
                    raw: self.raw.take(),
                }
            }

            /// Replaces the value of `self` with the value of `other`,
            /// leaving `other` empty.
            pub fn assign_from(&mut self, other: &mut Self) {
                let mut incoming = other.take();
                incoming.swap(self);
            }

            /// Returns a reference to the value if it is a `T`.
            #[inline]
            pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
                $crate::cast::any_cast_ref::<T, Self>(self)
            }

            /// Returns a mutable reference to the value if it is a `T`.
            #[inline]
            pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
                $crate::cast::any_cast_mut::<T, Self>(self)
            }

            /// Moves the value out if it is a `T`, or gives the container
            /// back unchanged.
            pub fn downcast<T: 'static>(mut self) -> Result<T, Self> {
                match self.raw.take_value::<T>() {
                    Some(value) => Ok(value),
                    None => Err(self),
                }
            }

            /// Returns a reference to the value without checking its type.
            ///
            /// # Safety
            ///
            /// The container must be non-empty and hold a value of exactly
            /// type `T`.
            #[inline]
            pub unsafe fn downcast_ref_unchecked<T>(&self) -> &T {
                // SAFETY: guaranteed by the caller.
                unsafe { $crate::cast::unsafe_any_cast_ref::<T, Self>(self) }
            }

            /// Returns a mutable reference to the value without checking its
            /// type.
            ///
            /// # Safety
            ///
            /// The container must be non-empty and hold a value of exactly
            /// type `T`.
            #[inline]
            pub unsafe fn downcast_mut_unchecked<T>(&mut self) -> &mut T {
                // SAFETY: guaranteed by the caller.
                unsafe { $crate::cast::unsafe_any_cast_mut::<T, Self>(self) }
            }
        }

        impl<Space> Default for $name<Space> {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl<Space> core::fmt::Debug for $name<Space> {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("type", &format_args!("{}", self.type_info()))
                    .field("heap", &self.is_heap())
                    .finish()
            }
        }

        impl<Space> $crate::erased::Sealed for $name<Space> {}

        impl<Space> $crate::ErasedAny for $name<Space> {
            #[inline]
            fn type_info(&self) -> $crate::TypeInfo {
                self.raw.type_info()
            }

            #[inline]
            fn is_empty(&self) -> bool {
                self.raw.is_empty()
            }

            #[inline]
            fn __cast_ptr(&self, requested: Option<core::any::TypeId>) -> Option<core::ptr::NonNull<u8>> {
                self.raw.cast_ptr(requested)
            }

            #[inline]
            fn __cast_mut_ptr(&mut self, requested: Option<core::any::TypeId>) -> Option<core::ptr::NonNull<u8>> {
                self.raw.cast_mut_ptr(requested)
            }

            fn __take_value<T: 'static>(&mut self) -> Option<T> {
                self.raw.take_value::<T>()
            }
        }
    };
}
