//! Utility functions shared by the session layer and the binary.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration stored in the application data directory
//! - [`tokenizer`] - Splitting document text into alphanumeric tokens
//!
//! ```
//! use triesearch::utils::extract_tokens;
//!
//! let tokens = extract_tokens(["tomato-soup", "salt"]);
//! assert_eq!(tokens, vec!["tomato", "soup", "salt"]);
//! ```

pub mod app_data;
pub mod tokenizer;

pub use app_data::*;
pub use tokenizer::*;
