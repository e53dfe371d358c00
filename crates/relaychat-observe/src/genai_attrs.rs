//! OpenTelemetry GenAI semantic convention attribute names.
//!
//! Used as field names on the upstream call span so exported traces line up
//! with other GenAI instrumentation. Span name convention: `"{operation} {model}"`
//! (e.g., `"chat gemini-2.5-flash"`).
//!
//! `tracing` span macros only take literal field names, so spans declare
//! these keys as string literals; the constants are what `Span::record`
//! is called with, and the literals must match them.

// --- Required attributes ---

/// The operation being performed (e.g., "chat").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The GenAI provider (e.g., "gemini").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

// --- Recommended attributes ---

/// The model ID requested.
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The model ID the provider says answered.
pub const GEN_AI_RESPONSE_MODEL: &str = "gen_ai.response.model";

/// Input tokens consumed, as reported by the provider.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// Output tokens generated, as reported by the provider.
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// Finish reason of the first candidate (e.g., "STOP").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

// --- Operation name values ---

/// Single-shot content generation over a chat history.
pub const OP_CHAT: &str = "chat";

// --- Provider name values ---

pub const PROVIDER_GEMINI: &str = "gemini";
