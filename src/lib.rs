//! # SmallAny: Type-Erased Values Without the Allocation
//!
//! [`SmallAny`] stores one value of any `Clone + 'static` type behind a
//! uniform handle and can later hand it back as its original type. It is a
//! replacement for `Box<dyn Any>` that keeps small values inside the container
//! and only falls back to the heap for values that do not fit.
//!
//! ## Core Concept
//!
//! Every container holds a pointer to a *manager*: one function, generated per
//! stored type, that knows how to drop, move, clone and identify the value.
//! The manager is chosen when the value is stored, together with where the
//! value lives:
//!
//! - values whose size and alignment fit the container's space are stored
//!   inline;
//! - all other values are moved into a heap block.
//!
//! Nothing else in the container depends on the stored type, so a
//! `SmallAny` is always two machine words (with the default space), no
//! matter what it holds.
//!
//! ## Quick Start
//!
//! ```rust
//! use smallany::{SmallAny, TypeInfo};
//!
//! // Pointer-sized values are stored inline
//! let mut number: SmallAny = SmallAny::new(42i32);
//! assert!(!number.is_heap());
//! assert_eq!(number.downcast_ref::<i32>(), Some(&42));
//! assert_eq!(number.type_info(), TypeInfo::of::<i32>());
//!
//! // Larger values go to the heap
//! let mut text: SmallAny = SmallAny::new(String::from("hello"));
//! assert!(text.is_heap());
//!
//! // Wrong types are rejected
//! assert!(text.downcast_ref::<i32>().is_none());
//!
//! // Containers can be swapped, cloned and cleared like any other value
//! number.swap(&mut text);
//! assert_eq!(number.downcast_ref::<String>().map(String::as_str), Some("hello"));
//! text.clear();
//! assert!(text.is_empty());
//! ```
//!
//! ## Configuration
//!
//! ### Feature Flags
//!
//! - **`std`** (enabled by default)
//!   - Links to the standard library
//!   - Disable for `#![no_std]` environments: `default-features = false`
//!
//! - **`tracing`** (optional)
//!   - Emits [`tracing`](https://docs.rs/tracing) events when a value is
//!     moved to the heap, when a checked cast fails and when an allocation
//!     fails
//!
//! ### Custom Space Types
//!
//! The inline capacity is a type parameter. The [`space`] module provides
//! word-sized arrays, and any sized type can be used:
//!
//! ```rust
//! use smallany::SmallAny;
//! use smallany::space::S4;
//!
//! type MySmallAny = SmallAny<S4>;
//!
//! let value: MySmallAny = SmallAny::new((1u64, 2u64, 3u64));
//! assert!(!value.is_heap()); // Fits in four words
//! ```
//!
//! **Important**: Space alignment matters! If the space alignment is smaller
//! than the value's required alignment, the value is heap-allocated
//! regardless of size.
//!
//! ## Casting
//!
//! Besides the inherent methods, the [`cast`] module offers free functions
//! that work on every container through the [`ErasedAny`] trait, in three
//! flavors: `Option`-returning, [`BadAnyCast`]-returning, and unchecked.
//!
//! ```rust
//! use smallany::{BadAnyCast, SmallAny};
//! use smallany::cast::any_cast;
//!
//! fn read_port(config: &SmallAny) -> Result<u16, BadAnyCast> {
//!     any_cast::<u16, _>(config)
//! }
//!
//! assert_eq!(read_port(&SmallAny::new(8080u16)), Ok(8080));
//! assert!(read_port(&SmallAny::new("8080")).is_err());
//! ```
//!
//! ## Move-Only Values
//!
//! [`UniqueAny`] is the same container without the `Clone` requirement on the
//! stored value, and therefore without `Clone` itself.
//!
//! ```rust
//! use smallany::UniqueAny;
//!
//! struct Handle(Box<u32>);
//!
//! let handle: UniqueAny = UniqueAny::new(Handle(Box::new(7)));
//! assert_eq!(*handle.downcast_ref::<Handle>().unwrap().0, 7);
//! ```
//!
//! ## Threads
//!
//! `SmallAny` and `UniqueAny` accept values of any type, so they are neither
//! `Send` nor `Sync`. [`SyncAny`] only accepts `Send + Sync` values and can be
//! moved to, and shared between, threads.
//!
//! ```rust
//! use smallany::SyncAny;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let shared = Arc::new(SyncAny::<smallany::space::S2>::new((1u32, 2u64)));
//! let readers: Vec<_> = (0..4)
//!     .map(|_| {
//!         let shared = Arc::clone(&shared);
//!         thread::spawn(move || shared.downcast_ref::<(u32, u64)>().copied())
//!     })
//!     .collect();
//!
//! for reader in readers {
//!     assert_eq!(reader.join().unwrap(), Some((1, 2)));
//! }
//! ```
//!
//! ## Type Identity Across Libraries
//!
//! Identity is decided by [`core::any::TypeId`]. Within one compiled program
//! this never yields a false negative. Across dynamically loaded libraries
//! built separately, the ids of the same type are not guaranteed to agree; the
//! unchecked casts exist for callers who know the stored type by other means.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]
#![deny(clippy::as_conversions)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod cast;
mod erased;
mod error;
mod manager;
mod raw;
mod smallany;
pub mod space;
mod sync;
mod type_info;
mod unique;

pub use crate::erased::ErasedAny;
pub use crate::error::{BadAnyCast, Error};
pub use crate::smallany::SmallAny;
pub use crate::sync::SyncAny;
pub use crate::type_info::TypeInfo;
pub use crate::unique::UniqueAny;
