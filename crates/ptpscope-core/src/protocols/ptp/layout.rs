pub const HEADER_LEN: usize = 12;

pub const LENGTH_RANGE: std::ops::Range<usize> = 0..4;
pub const TYPE_RANGE: std::ops::Range<usize> = 4..6;
pub const CODE_RANGE: std::ops::Range<usize> = 6..8;
pub const TRANSACTION_RANGE: std::ops::Range<usize> = 8..12;

pub const PARAM_SIZE: usize = 4;
pub const MAX_PARAMS: usize = 5;
/// Containers are packed on 4-byte boundaries on the wire.
pub const CONTAINER_ALIGN: usize = 4;

pub const TYPE_COMMAND: u16 = 0x0001;
pub const TYPE_DATA: u16 = 0x0002;
pub const TYPE_RESPONSE: u16 = 0x0003;
pub const TYPE_EVENT: u16 = 0x0004;
