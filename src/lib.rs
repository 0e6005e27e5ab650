//! crawl_rules library: rule evaluation core for a configuration-driven crawler
//!
//! Crawl behavior and detection knowledge are written declaratively. This
//! library makes those declarations executable:
//!
//! - [`expression`]: a small command language for "live" configuration
//!   values (`random(1, 100)`, `time(unix)`, `url()`)
//! - [`ruleset`]: the detection rule model and the signature indices that
//!   group HTTP header, meta tag, page content, URL and SSL signatures by
//!   target object
//! - [`plan`]: source configuration and execution plans
//!
//! # Example
//!
//! ```
//! use crawl_rules::ruleset::{all_url_micro_signatures_map, DetectionRule, UrlMicroSignature};
//! use crawl_rules::expression::Interpreter;
//!
//! let rules = vec![DetectionRule {
//!     rule_name: "admin panel".to_string(),
//!     object_name: " Server ".to_string(),
//!     url_micro_signatures: vec![UrlMicroSignature {
//!         signature: " /admin ".to_string(),
//!         confidence: 0.9,
//!     }],
//!     ..Default::default()
//! }];
//!
//! let index = all_url_micro_signatures_map(&rules);
//! assert_eq!(index.get("server").unwrap()[0].signature, "/admin");
//!
//! let delay = Interpreter::new().evaluate("random(1, 5)").unwrap();
//! assert!(delay.parse::<i64>().is_ok());
//! ```

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod expression;
pub mod initialization;
pub mod plan;
pub mod ruleset;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, NumericFallback};
pub use error_handling::{ExprError, InitializationError, RuleLoadError};
pub use expression::{EncodedCmd, Interpreter};
pub use ruleset::{DetectionIndex, DetectionRule};
