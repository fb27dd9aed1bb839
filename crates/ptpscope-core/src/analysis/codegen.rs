use crate::protocols::ptp::{CodeDomain, CodeOrigin, Container, ContainerCategory, lookup};

const BANNER: &str = "/* Generated PTP operation codes from trace analysis */";

fn upper_snake(name: &str) -> String {
    name.to_uppercase().replace(' ', "_")
}

fn define_prefix(origin: CodeOrigin) -> &'static str {
    match origin {
        CodeOrigin::Canon => "CANON_PTP_OP",
        CodeOrigin::Standard => "PTP_OP",
    }
}

/// Render C `#define` lines for the distinct operation codes observed in
/// command containers.
///
/// Output depends only on the set of distinct codes: duplicates and input
/// order do not affect it. Codes are emitted in ascending numeric order;
/// codes with no symbolic name are skipped.
///
/// # Examples
/// ```
/// use ptpscope_core::{decode_container, generate_operation_defines};
///
/// let bytes = [0x0c, 0, 0, 0, 0x01, 0, 0x16, 0x91, 0x01, 0, 0, 0];
/// let containers = vec![decode_container(&bytes)?];
/// let code = generate_operation_defines(&containers);
/// assert!(code.contains("#define CANON_PTP_OP_CAPTURE\t\t0x9116"));
/// # Ok::<(), ptpscope_core::PtpError>(())
/// ```
pub fn generate_operation_defines(containers: &[Container]) -> String {
    let mut codes: Vec<u16> = containers
        .iter()
        .filter(|container| container.category == ContainerCategory::Command)
        .map(|container| container.code)
        .collect();
    codes.sort_unstable();
    codes.dedup();

    let mut lines = vec![BANNER.to_string(), String::new()];
    for code in codes {
        if let Some((origin, name)) = lookup(CodeDomain::Operation, code) {
            lines.push(format!(
                "#define {}_{}\t\t0x{code:04X}",
                define_prefix(origin),
                upper_snake(name)
            ));
        }
    }
    lines.push(String::new());
    lines.join("\n")
}
