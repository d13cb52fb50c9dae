//! Golden scenarios
//!
//! Each test fixes the complete trace for one canonical input. These are
//! end-to-end: raw text goes through the loader, the engine runs to
//! completion, and the event stream is checked in order.
