//! # threemf-analyzer
//!
//! Plate, object and material reports for 3MF printing project packages as
//! written by Bambu Studio and OrcaSlicer.
//!
//! A package is a ZIP archive holding the model document
//! (`3D/3dmodel.model`), a settings overlay
//! (`Metadata/model_settings.config`) and optionally sub-assembly model files
//! and project settings. The analyzer extracts it to a scratch directory,
//! reads the documents, cross-references build items with plates and
//! settings metadata, and returns one [`PlateInfo`] per plate.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Lenient resolution: dangling references, malformed transforms and broken
//!   sub-assemblies never fail a report
//! - Object grouping and text/CSV/JSON renderings
//!
//! ## Example
//!
//! ```no_run
//! use threemf_analyzer::{grouping::group_objects_sorted, parse_package};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let package = parse_package("project.3mf")?;
//! for plate in &package.plates {
//!     println!("Plate {}: {}", plate.plate_id, plate.plate_name);
//!     for group in group_objects_sorted(&plate.objects) {
//!         println!("  {} x {}", group.count, group.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod assembler;
pub mod config;
pub mod error;
pub mod format;
pub mod grouping;
pub mod metadata;
pub mod model;
pub mod parser;
pub mod transform;

pub use assembler::{AssemblySource, assemble};
pub use config::{ParseOptions, PlateFallback, PlateOrder};
pub use error::{Error, Result};
pub use model::{
    ComponentInfo, GroupedObject, ObjectKind, ParsedPackage, PlateInfo, PlateObject,
};
pub use transform::Transform3D;

use std::path::Path;

use crate::archive::extract_archive_in;
use crate::parser::{read_model_document, read_project_settings, read_settings_document};

/// Analyze a 3MF package with the default options
///
/// # Arguments
///
/// * `path` - The package file
///
/// # Errors
///
/// Fails when the archive cannot be opened or extracted, or when the model
/// or settings document is missing or malformed. The scratch directory is
/// removed in every case.
///
/// # Example
///
/// ```no_run
/// use threemf_analyzer::parse_package;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let package = parse_package("project.3mf")?;
/// println!("{} objects on {} plates", package.object_count(), package.plates.len());
/// # Ok(())
/// # }
/// ```
pub fn parse_package(path: impl AsRef<Path>) -> Result<ParsedPackage> {
    parse_package_with_options(path, &ParseOptions::default())
}

/// Analyze a 3MF package with explicit options
///
/// # Example
///
/// ```no_run
/// use threemf_analyzer::{ParseOptions, PlateOrder, parse_package_with_options};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = ParseOptions::new()
///     .with_plate_order(PlateOrder::ById)
///     .with_default_plate(true);
/// let package = parse_package_with_options("project.3mf", &options)?;
/// # Ok(())
/// # }
/// ```
pub fn parse_package_with_options(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<ParsedPackage> {
    let scratch = extract_archive_in(path, options.scratch_root())?;

    let model = read_model_document(scratch.path())?;
    let settings = read_settings_document(scratch.path())?;

    let project = if options.materials() {
        read_project_settings(scratch.path()).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "project settings ignored");
            None
        })
    } else {
        None
    };

    let package = assembler::assemble(&model, &settings, project.as_ref(), &scratch, options);

    if let Err(e) = scratch.cleanup() {
        tracing::debug!(error = %e, "failed to remove scratch directory");
    }

    Ok(package)
}
