pub mod in_memory;
pub mod log_sink;
