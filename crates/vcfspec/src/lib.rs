//! # vcfspec - tfvars to VCF bring-up spec
//!
//! Turns a `terraform.tfvars` file into the JSON document VMware Cloud Builder expects for a VCF bring-up.
//!
//! ## Introduction for developers
//!
//! Conversion happens in two independent steps.
//!
//! ### Parsing
//!
//! see [parser::parse]
//!
//! Only the subset of HCL that shows up in tfvars files is understood:
//!
//! ```hcl
//! # comments start with a hash
//! instance_id  = "vcf01"
//! ceip_enabled = true
//! ntp_servers  = ["10.1.1.1", "10.1.1.2"]
//!
//! mgmt_esxi_hosts = [
//!   {
//!     hostname = "esx01.vcf.lab"
//!     password = "VMware123!"
//!   },
//! ]
//! ```
//!
//! The result is a flat map of [variables::Variables] plus a list of [diagnostic::Diagnostic]s. Parsing never fails:
//! whatever can not be understood is kept as a string or skipped, and reported.
//!
//! | **tfvars**              | **[value::Value]**             |
//! |-------------------------|--------------------------------|
//! | `true` / `false`        | `Bool`                         |
//! | `null`                  | `Null`                         |
//! | `"text"`                | `String` (quotes stripped)     |
//! | `42`, `0.5`             | `Number`                       |
//! | `["a", "b"]`            | `List` of `String`             |
//! | `[{ … }, { … }]`        | `List` of `Object`             |
//! | `{ key = "value" }`     | `Object` of scalars            |
//! | anything else           | `String` + diagnostic          |
//!
//! ### Projection
//!
//! see [projector::Projector]
//!
//! Well known variable names are mapped onto the [bringup::BringupSpec] schema. Missing or mistyped variables fall
//! back to [defaults::Defaults]. Inventory sections only show up when the matching list is non-empty and appliance
//! sections only when their `*_enabled` flag is `true`.
//!
//! ### Output
//!
//! [bringup::BringupSpec] serializes via [serde] with the key order Cloud Builder documents use.
//!
pub mod bringup;
pub mod defaults;
pub mod diagnostic;
pub mod parser;
pub mod projector;
pub mod value;
pub mod variables;

pub use parser::parse;
pub use projector::project;
