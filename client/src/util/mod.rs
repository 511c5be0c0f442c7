//! Utility helpers shared across client pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure formatting helpers live here so pages stay thin and the rules are
//! unit-tested without a browser.

pub mod format;
