/// Numeric helpers.
///
/// Conversions between the language's floating-point numbers and the host
/// integer types used for indexing and repetition, with explicit checks
/// instead of silent truncation.
pub mod num;

/// Text helpers.
///
/// String quoting and escaping used by the source formatter.
pub mod text;
