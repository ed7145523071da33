//! Stage coordination, content masking, and archiving
//!
//! [`Pipeline`] owns the output directory layout:
//!
//! ```text
//! <output_root>/<assessment>/
//!     environment.json
//!     recommendations.json
//!     <unit>/
//!         <unit>.json
//!         <copied configuration files>
//!         recommendations_<location>_<platform>.<type>
//! <output_root>/<assessment>.tar.gz
//! ```
//!
//! Providers only produce documents; every file written under the output root goes
//! through this module.

mod archive;
mod collect;
mod coordinator;
mod masking;
mod path_utils;

pub use archive::{ARCHIVE_EXTENSION, archive, archive_path};
pub use collect::copy_config_files;
pub use coordinator::Pipeline;
pub use masking::MaskSet;
pub use path_utils::sanitize_path_component;
