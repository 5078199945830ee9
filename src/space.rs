//! Inline storage spaces.
//!
//! A space is any sized type whose size and alignment bound the values that
//! can be stored inline. Values that do not fit are moved to the heap.
//!
//! ```
//! use smallany::SmallAny;
//! use smallany::space::{S1, S4};
//!
//! let word: SmallAny<S1> = SmallAny::new(7usize);
//! assert!(!word.is_heap());
//!
//! let pair: SmallAny<S1> = SmallAny::new((1usize, 2usize));
//! assert!(pair.is_heap());
//!
//! let pair: SmallAny<S4> = SmallAny::new((1usize, 2usize));
//! assert!(!pair.is_heap());
//! ```

/// Space of one machine word. This is the default space.
pub type S1 = [usize; 1];
/// Space of two machine words.
pub type S2 = [usize; 2];
/// Space of four machine words.
pub type S4 = [usize; 4];
/// Space of eight machine words.
pub type S8 = [usize; 8];
/// Space of sixteen machine words.
pub type S16 = [usize; 16];
/// Space of thirty-two machine words.
pub type S32 = [usize; 32];
/// Space of sixty-four machine words.
pub type S64 = [usize; 64];
