//! Approval workflow engine
//!
//! Stores workflow templates and turns them into concrete approval step
//! lists for individual business transactions.
//!
//! # Architecture
//!
//! - [`TemplateStore`] - Keyed template collection; [`InMemoryTemplateStore`] is the
//!   default backend
//! - [`InstantiationEngine`] - Filters template steps by their conditions, fail-closed
//! - [`TemplateService`] - Operation surface combining both
//! - [`seed`] - Built-in and file-based seed templates
//! - [`EngineConfig`] - Layered configuration (defaults, file, `APPROVAL_*` environment)
//!
//! # Example
//!
//! ```rust
//! use approval_engine::{EngineConfig, TemplateService};
//! use approval_condition::context;
//!
//! let service = TemplateService::from_config(&EngineConfig::default()).unwrap();
//!
//! let workflow = service
//!     .instantiate_template(&"pr-approval".into(), &context([("amount", 50000)]))
//!     .unwrap();
//! assert_eq!(workflow.step_numbers(), vec![1, 2]);
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod instantiation;
pub mod seed;
pub mod service;
pub mod store;

pub use config::{EngineConfig, InstantiationConfig, LoggingConfig, SeedConfig};
pub use instantiation::{evaluate_step, InstantiationEngine, DEFAULT_APPROVER_ROLE};
pub use seed::{builtin_templates, load_template_file, seed_store, SeedError, SeedResult};
pub use service::{diagnose_steps, ConditionDiagnostic, TemplateService};
pub use store::{InMemoryTemplateStore, TemplateStore};
