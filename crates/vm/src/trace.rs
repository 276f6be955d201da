//! Tracing hooks for the CSPC VM.
//!
//! A [`Tracer`] sees the machine state before every dispatched instruction
//! and once more when the run halts. [`LogTracer`] forwards each snapshot
//! to the `log` facade at debug level.

use std::fmt;

use crate::store::Store;
use cspc_common::Value;
use log::debug;

/// Machine state at one point of a run.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Address of the next instruction.
    pub pc: usize,
    /// Length of the instruction stream.
    pub len: usize,
    pub stack: &'a [Value],
    pub store: &'a Store,
}

/// Renders as `LEN: 5 PC: 2\tSTACK: [10]\tHEAP: {}`.
impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LEN: {} PC: {}\tSTACK: {}\tHEAP: {}",
            self.len,
            self.pc,
            crate::format_stack(self.stack),
            self.store
        )
    }
}

/// Receives machine snapshots during a run.
pub trait Tracer {
    /// Called before the instruction at `snapshot.pc` is dispatched.
    fn step(&mut self, snapshot: &Snapshot<'_>);

    /// Called once when the program counter leaves the stream.
    fn halt(&mut self, snapshot: &Snapshot<'_>) {
        self.step(snapshot);
    }
}

/// Tracer that logs every snapshot with `log::debug!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn step(&mut self, snapshot: &Snapshot<'_>) {
        debug!("{snapshot}");
    }
}

/// Tracer that keeps every rendered snapshot. Useful in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingTracer {
    pub lines: Vec<String>,
}

impl Tracer for RecordingTracer {
    fn step(&mut self, snapshot: &Snapshot<'_>) {
        self.lines.push(snapshot.to_string());
    }
}
