//! Options controlling how a package is analyzed

use std::path::{Path, PathBuf};

/// Plate that receives objects without a usable plate assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlateFallback {
    /// The first plate in declaration order
    #[default]
    FirstDeclared,
    /// The plate with the lowest ID
    LowestId,
}

/// Order in which plates appear in the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlateOrder {
    /// Declaration order of the settings document
    #[default]
    Declared,
    /// Ascending plate ID
    ById,
}

/// ID of the plate synthesized when a package declares none
pub const DEFAULT_PLATE_ID: usize = 1;

/// Name of the plate synthesized when a package declares none
pub const DEFAULT_PLATE_NAME: &str = "Plate 1";

/// Configuration for analyzing 3MF packages
///
/// # Example
///
/// ```
/// use threemf_analyzer::{ParseOptions, PlateFallback, PlateOrder};
///
/// let options = ParseOptions::new()
///     .with_plate_fallback(PlateFallback::LowestId)
///     .with_plate_order(PlateOrder::ById)
///     .with_default_plate(true);
/// assert!(options.default_plate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    scratch_root: Option<PathBuf>,
    plate_fallback: PlateFallback,
    plate_order: PlateOrder,
    default_plate: bool,
    materials: bool,
}

impl ParseOptions {
    /// Create options with the default behavior
    pub fn new() -> Self {
        Self {
            scratch_root: None,
            plate_fallback: PlateFallback::default(),
            plate_order: PlateOrder::default(),
            default_plate: false,
            materials: true,
        }
    }

    /// Extract packages below `root` instead of the system temp dir
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Choose the plate for objects without a usable plate assignment
    pub fn with_plate_fallback(mut self, fallback: PlateFallback) -> Self {
        self.plate_fallback = fallback;
        self
    }

    /// Choose the order of plates in the result
    pub fn with_plate_order(mut self, order: PlateOrder) -> Self {
        self.plate_order = order;
        self
    }

    /// Synthesize plate 1 "Plate 1" when the package declares no plates.
    ///
    /// Without it such packages report no objects at all.
    pub fn with_default_plate(mut self, enabled: bool) -> Self {
        self.default_plate = enabled;
        self
    }

    /// Attach materials from `Metadata/project_settings.config`
    pub fn with_materials(mut self, enabled: bool) -> Self {
        self.materials = enabled;
        self
    }

    /// Parent directory for scratch directories, if overridden
    pub fn scratch_root(&self) -> Option<&Path> {
        self.scratch_root.as_deref()
    }

    /// Fallback plate rule
    pub fn plate_fallback(&self) -> PlateFallback {
        self.plate_fallback
    }

    /// Plate emission order
    pub fn plate_order(&self) -> PlateOrder {
        self.plate_order
    }

    /// Whether a default plate is synthesized
    pub fn default_plate(&self) -> bool {
        self.default_plate
    }

    /// Whether materials are attached
    pub fn materials(&self) -> bool {
        self.materials
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
