use smallany::space::*;
use smallany::{ErasedAny, SmallAny, SyncAny, UniqueAny};

static_assertions::assert_not_impl_any!(SmallAny: Send, Sync);
static_assertions::assert_not_impl_any!(UniqueAny: Send, Sync, Clone);
static_assertions::assert_impl_all!(SyncAny: Send, Sync, Clone);
static_assertions::assert_impl_all!(SyncAny<S64>: Send, Sync);
static_assertions::assert_impl_all!(SmallAny<S4>: Clone, Default, core::fmt::Debug, ErasedAny, From<SyncAny<S4>>);
static_assertions::assert_impl_all!(UniqueAny<S4>: Default, core::fmt::Debug, ErasedAny, From<SmallAny<S4>>, From<SyncAny<S4>>);

static_assertions::assert_eq_size!(SmallAny, [usize; 2]);
static_assertions::assert_eq_size!(UniqueAny, [usize; 2]);
static_assertions::assert_eq_size!(SyncAny, [usize; 2]);
static_assertions::assert_eq_size!(SmallAny<S4>, [usize; 5]);

static_assertions::assert_obj_safe!(ErasedAny);

#[test]
fn test_empty_is_const() {
    const EMPTY: SmallAny = SmallAny::empty();
    assert!(EMPTY.is_empty());
    assert!(SmallAny::<S8>::default().is_empty());
    assert!(SyncAny::<S8>::default().is_empty());
}
