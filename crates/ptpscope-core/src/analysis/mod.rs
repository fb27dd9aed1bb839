use std::collections::BTreeMap;

use crate::protocols::ptp::{Container, ContainerCategory};
use crate::{
    CategoryCount, ContainerRecord, DiagnosticRecord, InputInfo, OperationCount, REPORT_VERSION,
    Report, ToolInfo, TraceSummary,
};

mod codegen;
mod walk;

pub use codegen::generate_operation_defines;
pub use walk::{
    DecodedContainer, TraceWalk, TraceWalker, WalkDiagnostic, WalkErrorKind, WalkEvent,
    align_offset, walk_trace,
};

/// Payload bytes shown in per-container hex previews.
const PAYLOAD_PREVIEW_LEN: usize = 32;

/// Walk a trace buffer and aggregate the result into a report.
///
/// The report is deterministic for identical input: containers appear in
/// wire order and aggregate counts are sorted by key.
///
/// # Examples
/// ```
/// use ptpscope_core::analyze_trace;
///
/// let bytes = [0x0c, 0, 0, 0, 0x01, 0, 0x02, 0x10, 0x01, 0, 0, 0];
/// let report = analyze_trace(&bytes);
/// assert_eq!(report.summary.containers_total, 1);
/// assert_eq!(report.containers[0].name.as_deref(), Some("PTP::OpenSession"));
/// ```
pub fn analyze_trace(data: &[u8]) -> Report {
    let walk = walk_trace(data);

    let mut categories: BTreeMap<String, u64> = BTreeMap::new();
    let mut operations: BTreeMap<String, u64> = BTreeMap::new();
    let mut containers = Vec::with_capacity(walk.containers.len());

    for DecodedContainer { offset, container } in &walk.containers {
        *categories.entry(container.category.label()).or_default() += 1;
        if container.category == ContainerCategory::Command {
            if let Some(name) = container.resolved_name() {
                *operations.entry(name).or_default() += 1;
            }
        }
        containers.push(container_record(*offset, container));
    }

    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "ptpscope".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: None,
            bytes: data.len() as u64,
        },
        summary: TraceSummary {
            containers_total: walk.containers.len() as u64,
        },
        containers,
        categories: categories
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
        operations: operations
            .into_iter()
            .map(|(operation, count)| OperationCount { operation, count })
            .collect(),
        diagnostics: walk
            .diagnostics
            .into_iter()
            .map(|diagnostic| DiagnosticRecord {
                offset: diagnostic.offset as u64,
                message: diagnostic.kind.to_string(),
            })
            .collect(),
    }
}

fn container_record(offset: usize, container: &Container) -> ContainerRecord {
    ContainerRecord {
        offset: offset as u64,
        length: container.length,
        category: container.category.label(),
        code: format!("0x{:04X}", container.code),
        name: container.resolved_name(),
        transaction_id: container.transaction_id,
        params: container
            .params
            .iter()
            .map(|param| format!("0x{param:08X}"))
            .collect(),
        payload_len: container.payload.len() as u64,
        payload_preview: payload_preview(&container.payload),
    }
}

fn payload_preview(payload: &[u8]) -> Option<String> {
    if payload.is_empty() {
        return None;
    }
    let head = &payload[..payload.len().min(PAYLOAD_PREVIEW_LEN)];
    Some(head.iter().map(|byte| format!("{byte:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::analyze_trace;

    fn container_bytes(length: u32, raw_type: u16, code: u16, transaction_id: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&length.to_le_bytes());
        bytes.extend_from_slice(&raw_type.to_le_bytes());
        bytes.extend_from_slice(&code.to_le_bytes());
        bytes.extend_from_slice(&transaction_id.to_le_bytes());
        bytes
    }

    #[test]
    fn aggregates_categories_and_operations() {
        let mut buffer = container_bytes(12, 0x0001, 0x9116, 1);
        buffer.extend(container_bytes(12, 0x0001, 0x9116, 2));
        buffer.extend(container_bytes(12, 0x0003, 0x2001, 2));

        let report = analyze_trace(&buffer);
        assert_eq!(report.summary.containers_total, 3);
        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.categories[0].category, "COMMAND");
        assert_eq!(report.categories[0].count, 2);
        assert_eq!(report.categories[1].category, "RESPONSE");
        assert_eq!(report.operations.len(), 1);
        assert_eq!(report.operations[0].operation, "Canon::Capture");
        assert_eq!(report.operations[0].count, 2);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn unknown_command_codes_still_count_as_operations() {
        let buffer = container_bytes(12, 0x0001, 0xBEEF, 1);
        let report = analyze_trace(&buffer);
        assert_eq!(report.operations[0].operation, "Unknown(0xBEEF)");
    }

    #[test]
    fn payload_preview_caps_at_thirty_two_bytes() {
        let mut buffer = container_bytes(60, 0x0002, 0x9155, 3);
        buffer.extend(std::iter::repeat_n(0xAB, 48));

        let report = analyze_trace(&buffer);
        let record = &report.containers[0];
        // 20 bytes are consumed as five parameters, 28 remain as payload.
        assert_eq!(record.params.len(), 5);
        assert_eq!(record.payload_len, 28);
        assert_eq!(
            record.payload_preview.as_deref(),
            Some("abababababababababababababababababababababababababababab")
        );
        assert_eq!(record.name, None);
    }

    #[test]
    fn malformed_length_is_reported_as_diagnostic() {
        let buffer = container_bytes(4, 0x0001, 0x1002, 1);
        let report = analyze_trace(&buffer);
        assert_eq!(report.summary.containers_total, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].offset, 0);
        assert!(report.diagnostics[0].message.contains("declared length 4"));
    }
}
