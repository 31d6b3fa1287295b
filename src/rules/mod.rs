//! Baseline lint rules
//!
//! One module per rule. Rules are independent and order-insensitive.

pub mod bad_assert;
pub mod final_class;
pub mod hash_map_capacity;
pub mod log_level_guard;
pub mod logger_field_name;
pub mod rate_limiter_warmup;
pub mod safe_arg_denied_names;
pub mod safe_logging_exception_message;
pub mod string_equality;
pub mod throwable_print_stack_trace;

// Re-export rule structs
pub use bad_assert::BadAssert;
pub use final_class::FinalClass;
pub use hash_map_capacity::HashMapCapacity;
pub use log_level_guard::LogLevelGuard;
pub use logger_field_name::LoggerFieldName;
pub use rate_limiter_warmup::RateLimiterWarmup;
pub use safe_arg_denied_names::SafeArgDeniedNames;
pub use safe_logging_exception_message::SafeLoggingExceptionMessage;
pub use string_equality::StringEquality;
pub use throwable_print_stack_trace::ThrowablePrintStackTrace;
