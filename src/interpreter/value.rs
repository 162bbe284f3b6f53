/// Core value types and their shared behavior.
///
/// Defines the `Value` enum with all runtime types, the function and
/// builtin payloads, the copy-on-assignment rule, equality, type names and
/// display formatting.
pub mod core;
