pub mod trace;

pub use trace::{InstructionBytes, LogTrace, NullTrace, TraceEntry, TraceLog, TraceSink};
