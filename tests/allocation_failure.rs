use smallany::space::S1;
use smallany::{Error, SmallAny, UniqueAny};

use std::alloc::{GlobalAlloc, Layout, System};
use std::ptr;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A value large enough to always go to the heap, with a size no other
/// allocation in this test binary is expected to have.
#[derive(Clone)]
struct Heavy {
    _owner: Rc<()>,
    bytes: [u8; 3001],
}

fn heavy(owner: &Rc<()>, fill: u8) -> Heavy {
    Heavy {
        _owner: Rc::clone(owner),
        bytes: [fill; 3001],
    }
}

struct RefuseHeavy;

static REFUSE: AtomicBool = AtomicBool::new(false);

unsafe impl GlobalAlloc for RefuseHeavy {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if REFUSE.load(Ordering::SeqCst) && layout == Layout::new::<Heavy>() {
            return ptr::null_mut();
        }
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static ALLOCATOR: RefuseHeavy = RefuseHeavy;

fn is_out_of_memory<T>(result: &Result<T, Error>) -> bool {
    matches!(result, Err(Error::OutOfMemory { layout }) if *layout == Layout::new::<Heavy>())
}

#[test]
fn failed_allocation_is_reported() {
    let rc = Rc::new(());
    let big: SmallAny = SmallAny::new(heavy(&rc, 7));
    let mut target: SmallAny = SmallAny::new(String::from("kept"));
    let mut unique: UniqueAny = UniqueAny::new(1u8);
    assert!(big.is_heap());
    assert_eq!(Rc::strong_count(&rc), 2);

    REFUSE.store(true, Ordering::SeqCst);

    // The rejected value is dropped, not leaked.
    let result = SmallAny::<S1>::try_new(heavy(&rc, 0));
    assert!(is_out_of_memory(&result));
    assert_eq!(Rc::strong_count(&rc), 2);

    // The assignment target keeps its old value.
    let result = target.try_assign(heavy(&rc, 0));
    assert!(is_out_of_memory(&result));
    assert_eq!(target.downcast_ref::<String>().map(String::as_str), Some("kept"));

    let result = unique.try_assign(heavy(&rc, 0));
    assert!(is_out_of_memory(&result));
    assert_eq!(unique.downcast_ref::<u8>(), Some(&1));

    // Copying a heap value clones it first; the clone is dropped on failure.
    let result = big.try_clone();
    assert!(is_out_of_memory(&result));
    assert_eq!(Rc::strong_count(&rc), 2);
    assert_eq!(big.downcast_ref::<Heavy>().map(|h| h.bytes[0]), Some(7));

    if let Err(err) = result {
        assert_eq!(
            err.to_string(),
            format!(
                "memory allocation of {} bytes (align {}) failed",
                std::mem::size_of::<Heavy>(),
                std::mem::align_of::<Heavy>()
            )
        );
    }

    REFUSE.store(false, Ordering::SeqCst);

    let copy = big.try_clone().unwrap();
    assert_eq!(Rc::strong_count(&rc), 3);
    target.try_assign(copy.downcast::<Heavy>().ok().unwrap()).unwrap();
    assert!(target.is::<Heavy>());
}
