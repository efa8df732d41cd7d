//! Logging facilities for Trellis.
//!
//! Trellis instruments itself with the `tracing` crate. To see logs, install
//! a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Per-subsystem filtering uses the target constants in [`targets`], e.g.
//! `RUST_LOG=trellis::row_mapper=trace` to watch row-mapping decisions while
//! keeping everything else quiet.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal emission.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Model mutation and change batches.
    pub const MODEL: &str = "trellis::model";
    /// Selection model changes.
    pub const SELECTION: &str = "trellis::selection";
    /// Row/path mapping and structural recomputation.
    pub const ROW_MAPPER: &str = "trellis::row_mapper";
    /// View materialization, scrolling, and editing.
    pub const VIEW: &str = "trellis::view";
}
