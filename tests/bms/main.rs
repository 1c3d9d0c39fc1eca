//! Tests for `bms_grammar::bms`.

mod definitions;
#[cfg(feature = "diagnostics")]
mod diagnostics_test;
mod files;
#[cfg(feature = "serde")]
mod serde_test;
mod strict;
