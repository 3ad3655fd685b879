//! Measura Core
//!
//! Fundamental types shared by every Measura crate:
//! - `UnitCategory`: closed set of dimensional domains
//! - `UnitDefinition`: immutable description of one unit symbol
//! - `UnitRegistry` / `RegistryBuilder`: immutable snapshots and their builder
//! - `ThreadSafeRegistry`: snapshot publisher for concurrent use
//! - `UnitError`: the four error kinds every entry point can report

mod category;
mod definition;
mod error;
mod precision;
mod registry;
mod shared;

pub use category::UnitCategory;
pub use definition::{Conversion, CustomUnitBuilder, UnitDefinition};
pub use error::{codes, UnitError};
pub use precision::{format_number, RoundingMode};
pub use registry::{RegistryBuilder, UnitRegistry};
pub use shared::ThreadSafeRegistry;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Conversion, CustomUnitBuilder, RegistryBuilder, RoundingMode, ThreadSafeRegistry,
        UnitCategory, UnitDefinition, UnitError, UnitRegistry,
    };
}
