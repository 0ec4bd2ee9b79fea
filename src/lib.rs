//! # sortvis
//!
//! Step-by-step visualizer for bubble, insertion and selection sort.
//!
//! - [`engine`]: resumable steppers that sort a borrowed slice one step at a
//!   time and report the indices they touched,
//! - [`driver`]: the `Idle`/`Sorting` state machine that resumes one stepper
//!   per tick and hands frames to a [`driver::Renderer`],
//! - `tui` (feature `tui`): ratatui drawing and keyboard input.
//!
//! ## Example
//!
//! ```rust
//! use sortvis::prelude::*;
//!
//! let config = VisConfig::builder().seed(42).length(8).build();
//! let mut driver = Driver::new(&config)?;
//! driver.handle(Command::StartSort)?;
//! while driver.phase() == Phase::Sorting {
//!     driver.tick()?;
//! }
//! assert!(Order::Ascending.is_sorted(driver.values()));
//! # Ok::<(), SortError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod cli;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod logging;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{VisConfig, VisConfigBuilder};
    pub use crate::driver::{Command, Driver, FrameRequest, InputSource, Phase, Renderer};
    pub use crate::engine::clock::FrameClock;
    pub use crate::engine::rng::SeqRng;
    pub use crate::engine::{
        Action, Advance, Algorithm, Granularity, Highlights, Order, Role, SortStepper, Step,
        StepSource,
    };
    pub use crate::error::{SortError, SortResult};
}

/// Re-export for public API
pub use error::{SortError, SortResult};
