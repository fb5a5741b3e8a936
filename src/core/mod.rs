//! Core infrastructure module for the data sanity engine.
//!
//! This module provides the foundational components shared by every other
//! module: enumerations and type aliases, constants, the error taxonomy and
//! the trait seams used by the reduction engine.
//!
//! # Organization
//!
//! - [`types`]: Task types, validation intensities and column roles
//! - [`constants`]: Class labels, sampling defaults and diagnostic messages
//! - [`error`]: The [`SanityError`] type and [`Result`] alias
//! - [`traits`]: The [`PartitionSource`] and [`Predicate`] abstractions
//!
//! # Usage
//!
//! ```rust
//! use data_sanity::core::{
//!     types::{TaskType, ValidationIntensity},
//!     constants::DEFAULT_SAMPLE_FRACTION,
//!     error::{Result, SanityError},
//! };
//!
//! let task: TaskType = "poisson_regression".parse()?;
//! assert_eq!(task, TaskType::PoissonRegression);
//! assert_eq!(ValidationIntensity::default(), ValidationIntensity::Full);
//! assert!(DEFAULT_SAMPLE_FRACTION > 0.0);
//! # Ok::<(), SanityError>(())
//! ```

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{Result, SanityError};
pub use traits::*;
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};

static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize logging for the library.
///
/// Installs `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
/// Calling this more than once is harmless.
pub fn initialize_core() -> Result<()> {
    if CORE_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    // Another logger may already be installed by the host application
    let _ = env_logger::try_init();

    log::info!("data-sanity {} initialized", DATA_SANITY_VERSION);
    log::debug!("rayon worker threads available: {}", rayon::current_num_threads());
    Ok(())
}

/// Check if the core module is initialized
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::SeqCst)
}
