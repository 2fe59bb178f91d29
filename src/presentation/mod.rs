//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//! - Choosing how progress is reported (console, NDJSON, silent)
//!
//! ## Structure
//!
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use bcr_openssl::presentation::factory;
//!
//! let harvest = factory::create_harvest_use_case(&config, os)?;
//! let bundle = harvest.execute(&options, events.as_ref())?;
//! ```

pub mod factory;

pub use factory::{
    create_archiver, create_event_sink, create_formatter, create_harvest_use_case,
    module_settings,
};
