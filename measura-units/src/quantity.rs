//! Packaging conversions for discrete quantities
//!
//! Box, pallet and package sizes are context-specific, so the caller
//! supplies the size instead of resolving it from the registry.

use measura_core::UnitError;
use crate::dimension::QuantityDim;
use crate::Measure;

impl Measure<QuantityDim> {
    /// Number of boxes of `box_size` pieces (may be fractional)
    pub fn to_boxes(&self, box_size: f64) -> Result<f64, UnitError> {
        self.to_packaging("box", box_size)
    }

    /// Number of pallets of `pallet_size` pieces (may be fractional)
    pub fn to_pallets(&self, pallet_size: f64) -> Result<f64, UnitError> {
        self.to_packaging("pallet", pallet_size)
    }

    /// Number of packages of `package_size` pieces (may be fractional)
    pub fn to_packages(&self, package_size: f64) -> Result<f64, UnitError> {
        self.to_packaging("package", package_size)
    }

    /// Whole packages needed to hold every piece
    pub fn packages_needed(&self, package_size: f64) -> Result<u64, UnitError> {
        let packages = self.to_packaging("package", package_size)?;
        if packages <= 0.0 {
            return Ok(0);
        }
        Ok(packages.ceil() as u64)
    }

    fn to_packaging(&self, kind: &str, size: f64) -> Result<f64, UnitError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(UnitError::invalid_argument(format!(
                "{} size must be positive, got {}",
                kind, size
            )));
        }
        let count = self.canonical() / size;
        if !count.is_finite() {
            return Err(UnitError::invalid_argument(format!("{} count out of range for size {}", kind, size)));
        }
        Ok(count)
    }
}
