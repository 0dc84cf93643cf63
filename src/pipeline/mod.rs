//! Extraction stages for API-reference HTML pages.
//!
//! Each submodule pulls one symbol family out of the parsed DOM. Keeping
//! stages separate makes each independently testable and lets the page
//! orchestrator compose only the extractors a page kind needs.
//!
//! ## Data Flow
//!
//! ```text
//! parsed Html ──▶ property / method / constant / structs / function
//!                      │
//!                      └──▶ typed symbol model (crate::symbol)
//! ```
//!
//! 1. [`dom`]      — shared traversal helpers and per-section bookkeeping
//! 2. [`docref`]   — abstract + discussion prose for any documented node
//! 3. [`types`]    — declared-type token normalisation
//! 4. [`property`] — `@property` declarations
//! 5. [`method`]   — class and instance methods, in document order
//! 6. [`constant`] — enumerations and loose constants, delegating structs
//! 7. [`structs`]  — struct blocks with positional member descriptions
//! 8. [`function`] — free functions on reference pages

pub mod constant;
pub mod docref;
pub mod dom;
pub mod function;
pub mod method;
pub mod property;
pub mod structs;
pub mod types;
