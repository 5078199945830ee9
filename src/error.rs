use core::alloc::Layout;

use crate::type_info::TypeInfo;

/// Error returned by a checked cast whose requested type does not match the
/// stored one.
///
/// An empty container fails every checked cast; [`BadAnyCast::stored`] is then
/// [`TypeInfo::empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("failed conversion using any_cast: requested `{requested}`, found `{stored}`")]
pub struct BadAnyCast {
    requested: TypeInfo,
    stored: TypeInfo,
}

impl BadAnyCast {
    pub(crate) fn new(requested: TypeInfo, stored: TypeInfo) -> BadAnyCast {
        log_event!(
            debug,
            requested = requested.name(),
            stored = stored.name(),
            "any_cast failed"
        );
        BadAnyCast { requested, stored }
    }

    /// The type the caller asked for.
    pub fn requested(&self) -> TypeInfo {
        self.requested
    }

    /// The type actually held by the container.
    pub fn stored(&self) -> TypeInfo {
        self.stored
    }
}

/// Errors reported by the fallible operations of this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A checked cast failed.
    #[error(transparent)]
    BadCast(#[from] BadAnyCast),
    /// The heap block for a value that does not fit inline could not be
    /// allocated.
    #[error("memory allocation of {} bytes (align {}) failed", .layout.size(), .layout.align())]
    OutOfMemory {
        /// Layout of the failed allocation.
        layout: Layout,
    },
}

impl Error {
    pub(crate) fn out_of_memory(layout: Layout) -> Error {
        log_event!(
            warn,
            size = layout.size(),
            align = layout.align(),
            "heap allocation for erased value failed"
        );
        Error::OutOfMemory { layout }
    }
}

#[cfg(test)]
mod tests {
    use super::{BadAnyCast, Error};
    use crate::TypeInfo;
    use core::alloc::Layout;

    #[test]
    fn test_bad_cast_message() {
        let err = BadAnyCast::new(TypeInfo::of::<i32>(), TypeInfo::of::<u8>());
        assert_eq!(
            err.to_string(),
            "failed conversion using any_cast: requested `i32`, found `u8`"
        );
        assert_eq!(err.requested(), TypeInfo::of::<i32>());
        assert_eq!(err.stored(), TypeInfo::of::<u8>());
    }

    #[test]
    fn test_error_from_bad_cast() {
        let err: Error = BadAnyCast::new(TypeInfo::of::<i32>(), TypeInfo::empty()).into();
        assert!(matches!(err, Error::BadCast(_)));
        assert!(err.to_string().contains("<empty>"));
    }

    #[test]
    fn test_out_of_memory_message() {
        let layout = Layout::new::<[u64; 4]>();
        let err = Error::out_of_memory(layout);
        assert_eq!(err.to_string(), "memory allocation of 32 bytes (align 8) failed");
    }
}
