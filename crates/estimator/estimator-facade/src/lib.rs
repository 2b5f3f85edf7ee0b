//! Estimator Facade
//!
//! High-level API for estimators over collections of time series.
//! Re-exports all public types from the estimator stack for convenient usage.
//!
//! # Example
//!
//! ```rust
//! use estimator_facade::prelude::*;
//!
//! let x = RawCollection::array3(3, 1, 4, (0..12).map(|v| v as f64).collect());
//! let mut reg = Regressor::new(MeanRegressor::new()).unwrap();
//! reg.fit(&x, &Target::values(vec![1.0, 2.0, 3.0])).unwrap();
//! assert_eq!(reg.predict(&x).unwrap(), vec![2.0, 2.0, 2.0]);
//! ```

// Re-export everything from SPI
pub use estimator_spi::*;

// Re-export from API for completeness (mostly overlaps with SPI re-exports)
#[allow(unused_imports)]
pub use estimator_api::*;

// Re-export everything from Core
#[allow(unused_imports)]
pub use estimator_core::*;

// Explicit re-exports for documentation
pub use estimator_core::prelude;
