//! Ptpscope core library for post-mortem PTP trace analysis.
//!
//! This crate implements the offline analysis pipeline used by the CLI:
//! trace sources feed the analysis layer, which drives the PTP container
//! decoder (layout/reader/parser) and aggregates results into a
//! deterministic report. Parsing is byte-oriented and side-effect free;
//! all I/O is isolated in `source` modules. Protocol conventions are
//! captured in readers so parsers stay minimal.
//!
//! Invariants:
//! - Report outputs are deterministic and stable across runs.
//! - Code classification is total: vendor tables shadow standard tables
//!   and unresolved codes degrade to hex labels, never errors.
//! - A walk terminates on the first decode failure or malformed declared
//!   length; containers decoded before that point remain valid.
//!
//! Version française (résumé):
//! Cette crate fournit le cœur d'analyse hors ligne : sources -> marcheur
//! de trace -> décodeur de conteneurs PTP -> rapport déterministe. Les E/S
//! restent dans `source`, les conventions du protocole dans `reader`. La
//! classification des codes (Canon d'abord, PTP ensuite) n'échoue jamais.
//!
//! # Examples
//! ```
//! use ptpscope_core::analyze_trace;
//!
//! let trace = [0x0c, 0, 0, 0, 0x01, 0, 0x02, 0x10, 0x01, 0, 0, 0];
//! let report = analyze_trace(&trace);
//! assert_eq!(report.report_version, ptpscope_core::REPORT_VERSION);
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
mod protocols;
mod source;

pub use analysis::{
    DecodedContainer, TraceWalk, TraceWalker, WalkDiagnostic, WalkErrorKind, WalkEvent,
    align_offset, analyze_trace, generate_operation_defines, walk_trace,
};
pub use protocols::ptp::{
    CodeDomain, CodeOrigin, Container, ContainerCategory, PtpError, decode_container, lookup,
    resolve_name,
};
pub use source::{SourceError, parse_hex_trace, read_trace_file};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Aggregated trace analysis report with deterministic ordering.
///
/// # Examples
/// ```
/// use ptpscope_core::analyze_trace;
///
/// let report = analyze_trace(&[]);
/// assert!(report.containers.is_empty());
/// assert_eq!(report.input.bytes, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input trace metadata.
    pub input: InputInfo,
    /// Whole-trace aggregate counters.
    pub summary: TraceSummary,
    /// Decoded containers in wire order.
    pub containers: Vec<ContainerRecord>,
    /// Per-category counts, sorted by category label.
    pub categories: Vec<CategoryCount>,
    /// Per-operation counts for command containers, sorted by name.
    pub operations: Vec<OperationCount>,
    /// Walk diagnostics in the order they occurred.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<DiagnosticRecord>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "ptpscope").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input trace metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path when the trace came from a file; absent for hex input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Whole-trace aggregate counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Number of containers decoded from the trace.
    pub containers_total: u64,
}

/// One decoded container as it appears in the report.
///
/// Codes and parameters are rendered as uppercase hex strings so reports
/// read the same way as the raw protocol documentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Byte offset of this container within the trace.
    pub offset: u64,
    /// Declared container length from the header (advisory).
    pub length: u32,
    /// Category label (e.g., "COMMAND", "Unknown(0x0007)").
    pub category: String,
    /// Raw code as 4-digit uppercase hex (e.g., "0x1002").
    pub code: String,
    /// Namespaced code name when the category has a classification
    /// domain; absent for data and unknown containers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Transaction correlation identifier.
    pub transaction_id: u32,
    /// Decoded parameters as 8-digit uppercase hex.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
    /// Payload length in bytes.
    pub payload_len: u64,
    /// Lowercase hex of the first 32 payload bytes, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_preview: Option<String>,
}

/// Count of containers sharing one category label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Count of command containers sharing one resolved operation name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationCount {
    pub operation: String,
    pub count: u64,
}

/// Structured walk diagnostic as it appears in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// Byte offset at which the walk stopped.
    pub offset: u64,
    /// Human-readable failure description.
    pub message: String,
}
