//! Domain Layer
//!
//! The queue configuration model and the parser that builds it.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (CapacityValue, QueueState, property keys)
//! - `entities/` - The queue tree and parse results (ParsedQueue, ParseResult)
//! - `services/` - Parsing and serialization of flat configurations
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system
//! 2. **Total** - Parsing never fails; problems are returned as data
//! 3. **Stateless** - Nothing is shared between parse calls

pub mod entities;
pub mod services;
pub mod value_objects;
