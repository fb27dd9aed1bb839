use super::codes::{self, CodeDomain};
use super::error::PtpError;
use super::layout;
use super::reader::PtpReader;

/// Container kind decoded from the 16-bit type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerCategory {
    Command,
    Data,
    Response,
    Event,
    Unknown(u16),
}

impl ContainerCategory {
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            layout::TYPE_COMMAND => ContainerCategory::Command,
            layout::TYPE_DATA => ContainerCategory::Data,
            layout::TYPE_RESPONSE => ContainerCategory::Response,
            layout::TYPE_EVENT => ContainerCategory::Event,
            other => ContainerCategory::Unknown(other),
        }
    }

    pub fn raw(&self) -> u16 {
        match self {
            ContainerCategory::Command => layout::TYPE_COMMAND,
            ContainerCategory::Data => layout::TYPE_DATA,
            ContainerCategory::Response => layout::TYPE_RESPONSE,
            ContainerCategory::Event => layout::TYPE_EVENT,
            ContainerCategory::Unknown(raw) => *raw,
        }
    }

    /// Display label matching the trace-report vocabulary.
    pub fn label(&self) -> String {
        match self {
            ContainerCategory::Command => "COMMAND".to_string(),
            ContainerCategory::Data => "DATA".to_string(),
            ContainerCategory::Response => "RESPONSE".to_string(),
            ContainerCategory::Event => "EVENT".to_string(),
            ContainerCategory::Unknown(raw) => format!("Unknown(0x{raw:04X})"),
        }
    }

    /// Classification domain for the code field. Data and unknown
    /// containers carry codes with no applicable namespace.
    pub fn domain(&self) -> Option<CodeDomain> {
        match self {
            ContainerCategory::Command => Some(CodeDomain::Operation),
            ContainerCategory::Response => Some(CodeDomain::Response),
            ContainerCategory::Event => Some(CodeDomain::Event),
            ContainerCategory::Data | ContainerCategory::Unknown(_) => None,
        }
    }
}

/// One decoded PTP container. Immutable value record; the declared
/// `length` is advisory metadata consumed by the trace walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub length: u32,
    pub category: ContainerCategory,
    pub code: u16,
    pub transaction_id: u32,
    pub params: Vec<u32>,
    pub payload: Vec<u8>,
}

impl Container {
    /// Namespaced name for the code, when the category implies a domain.
    pub fn resolved_name(&self) -> Option<String> {
        let domain = self.category.domain()?;
        Some(codes::resolve_name(domain, self.code))
    }
}

/// Decode a single container from the front of `data`.
///
/// The fixed 12-byte header is followed by up to five little-endian u32
/// parameters; everything after the last complete parameter is payload.
/// The declared length is not validated against the supplied byte count.
pub fn decode_container(data: &[u8]) -> Result<Container, PtpError> {
    let reader = PtpReader::new(data);
    reader.require_len(layout::HEADER_LEN)?;

    let length = reader.read_u32_le(layout::LENGTH_RANGE)?;
    let raw_type = reader.read_u16_le(layout::TYPE_RANGE)?;
    let code = reader.read_u16_le(layout::CODE_RANGE)?;
    let transaction_id = reader.read_u32_le(layout::TRANSACTION_RANGE)?;

    let window_end = reader
        .len()
        .min(layout::HEADER_LEN + layout::MAX_PARAMS * layout::PARAM_SIZE);
    let mut params = Vec::new();
    let mut cursor = layout::HEADER_LEN;
    while cursor + layout::PARAM_SIZE <= window_end {
        params.push(reader.read_u32_le(cursor..cursor + layout::PARAM_SIZE)?);
        cursor += layout::PARAM_SIZE;
    }

    let payload = reader.tail(cursor).to_vec();

    Ok(Container {
        length,
        category: ContainerCategory::from_raw(raw_type),
        code,
        transaction_id,
        params,
        payload,
    })
}
