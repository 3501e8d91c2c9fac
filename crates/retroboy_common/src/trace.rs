//! Instruction trace surface shared by the CPU cores.
//!
//! A core calls into its `TraceSink` once per executed instruction. Tracing
//! is a configuration choice: `NullTrace` reports itself as disabled so the
//! core never builds an entry, while `TraceLog` keeps an append-only record
//! that debuggers and tests can inspect afterwards.
use std::fmt;

/// Longest instruction encoding we record (Z80 `DD CB d op`).
pub const MAX_INSTRUCTION_BYTES: usize = 4;

/// Raw bytes fetched while executing a single instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstructionBytes {
    bytes: [u8; MAX_INSTRUCTION_BYTES],
    len: u8,
}

impl InstructionBytes {
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append a fetched byte. Bytes past the fourth are dropped.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        let len = self.len as usize;
        if len < MAX_INSTRUCTION_BYTES {
            self.bytes[len] = byte;
            self.len += 1;
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for InstructionBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

/// One executed instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    /// Address of the first opcode byte.
    pub address: u16,
    pub bytes: InstructionBytes,
    pub mnemonic: String,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}  {:<12} {}", self.address, self.bytes.to_string(), self.mnemonic)
    }
}

/// Receiver for per-instruction trace records.
pub trait TraceSink {
    /// Whether the core should build entries at all.
    ///
    /// Cores check this before formatting a mnemonic, so a disabled sink
    /// costs a single branch per instruction.
    fn enabled(&self) -> bool {
        true
    }

    fn record(&mut self, entry: TraceEntry);
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    #[inline]
    fn enabled(&self) -> bool {
        false
    }

    #[inline]
    fn record(&mut self, _entry: TraceEntry) {}
}

/// Append-only in-memory trace.
///
/// With a limit set, recording stops once `limit` entries are stored; later
/// instructions are counted in `dropped` but not kept.
#[derive(Clone, Debug, Default)]
pub struct TraceLog {
    entries: Vec<TraceEntry>,
    limit: Option<usize>,
    dropped: u64,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::with_capacity(limit.min(4096)),
            limit: Some(limit),
            dropped: 0,
        }
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of instructions executed after the limit was reached.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl TraceSink for TraceLog {
    fn enabled(&self) -> bool {
        true
    }

    fn record(&mut self, entry: TraceEntry) {
        match self.limit {
            Some(limit) if self.entries.len() >= limit => {
                self.dropped = self.dropped.saturating_add(1);
            }
            _ => self.entries.push(entry),
        }
    }
}

/// Forwards every entry to `log::trace!` under the given target.
#[derive(Clone, Copy, Debug)]
pub struct LogTrace {
    pub target: &'static str,
}

impl Default for LogTrace {
    fn default() -> Self {
        Self { target: "retroboy::trace" }
    }
}

impl TraceSink for LogTrace {
    fn enabled(&self) -> bool {
        log::log_enabled!(target: self.target, log::Level::Trace)
    }

    fn record(&mut self, entry: TraceEntry) {
        log::trace!(target: self.target, "{entry}");
    }
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    #[inline]
    fn enabled(&self) -> bool {
        (**self).enabled()
    }

    #[inline]
    fn record(&mut self, entry: TraceEntry) {
        (**self).record(entry)
    }
}
