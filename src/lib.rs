//! ESM Lexer - find the imports and exports of ECMAScript modules
//!
//! One forward pass over the module text, no syntax tree. Every reported
//! range slices back to exactly the construct it names.
//!
//! # Architecture
//!
//! ```text
//! esm-lexer-config/  - Configuration data (serde)
//! esm-lexer-core/    - Scanner (pure logic, no IO)
//! esm-lexer-api/     - Limits, strict mode, offset encoding, errors
//! esm-lexer-cli/     - `esm-lexer` binary
//! ```
//!
//! # Quick Start
//!
//! ```
//! use esm_lexer::{run, RunConfig};
//!
//! let source = "import { foo } from \"bar\";\nexport const baz = 1;";
//! let output = run(source, &RunConfig::default()).unwrap();
//!
//! let import = output.analysis.imports()[0].as_static().unwrap();
//! assert_eq!(import.module_specifier(source), "bar");
//! assert_eq!(output.analysis.exports()[0].name(source), "baz");
//! ```

pub use esm_lexer_api::*;
