// =============================================================================
// Payload Assembly
// =============================================================================
//
// Request-scoped orchestration: normalise the inputs, ask the provider for
// raw data, run the indicator engine and shape the JSON payloads. Nothing
// here holds state between requests.

pub mod chart;
pub mod quote;
pub mod search;

pub use chart::assemble_chart;
pub use quote::assemble_quote;
pub use search::search_symbols;
