//! Layered code classification tables.
//!
//! Each domain (operation, response, event) has a Canon vendor table and a
//! standard PTP table, consulted in that order. Tables are static sorted
//! slices; lookup is total over all u16 codes and never fails, so unknown
//! codes degrade to a hex label instead of an error.

/// Classification domain implied by a container's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeDomain {
    Operation,
    Response,
    Event,
}

/// Which tier of the registry a code resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeOrigin {
    Canon,
    Standard,
}

impl CodeOrigin {
    /// Namespace prefix used in resolved display names.
    pub fn namespace(&self) -> &'static str {
        match self {
            CodeOrigin::Canon => "Canon",
            CodeOrigin::Standard => "PTP",
        }
    }
}

/// Standard PTP operation codes.
pub const STANDARD_OPERATIONS: &[(u16, &str)] = &[
    (0x1001, "GetDeviceInfo"),
    (0x1002, "OpenSession"),
    (0x1003, "CloseSession"),
    (0x1004, "GetStorageIDs"),
    (0x1005, "GetStorageInfo"),
    (0x1006, "GetNumObjects"),
    (0x1007, "GetObjectHandles"),
    (0x1008, "GetObjectInfo"),
    (0x1009, "GetObject"),
    (0x100A, "DeleteObject"),
    (0x100E, "InitiateCapture"),
    (0x1014, "GetDevicePropDesc"),
    (0x1015, "GetDevicePropValue"),
    (0x1016, "SetDevicePropValue"),
];

/// Canon vendor-extension operation codes.
pub const CANON_OPERATIONS: &[(u16, &str)] = &[
    (0x9101, "GetChanges"),
    (0x9102, "GetFolderInfo"),
    (0x9103, "CreateFolder"),
    (0x9107, "GetPartialObject"),
    (0x9108, "SetObjectTime"),
    (0x9109, "GetDeviceInfoEx"),
    (0x9110, "SetProperty"),
    (0x9116, "Capture"),
    (0x9127, "GetProperty"),
    (0x9128, "InitiateReleaseControl"),
    (0x9129, "TerminateReleaseControl"),
    (0x9130, "RemoteReleaseOn"),
    (0x9131, "RemoteReleaseOff"),
    (0x9153, "LiveViewStart"),
    (0x9154, "LiveViewStop"),
    (0x9155, "GetLiveView"),
    (0x9156, "LiveViewLock"),
    (0x9157, "LiveViewUnlock"),
    (0x9158, "DriveLens"),
    (0x9159, "SetAFPoint"),
    (0x915A, "GetAFInfo"),
    (0x915E, "MovieStart"),
    (0x915F, "MovieStop"),
];

/// Standard PTP response codes.
pub const STANDARD_RESPONSES: &[(u16, &str)] = &[
    (0x2001, "OK"),
    (0x2002, "General Error"),
    (0x2003, "Session Not Open"),
    (0x2004, "Invalid Transaction ID"),
    (0x2005, "Operation Not Supported"),
    (0x2006, "Parameter Not Supported"),
    (0x2007, "Incomplete Transfer"),
    (0x2008, "Invalid Storage ID"),
    (0x2009, "Invalid Object Handle"),
    (0x200A, "Device Property Not Supported"),
    (0x200B, "Invalid Object Format Code"),
    (0x200C, "Storage Full"),
    (0x200D, "Object Write Protected"),
    (0x200E, "Store Read Only"),
    (0x200F, "Access Denied"),
    (0x2010, "No Thumbnail Present"),
    (0x2011, "Self Test Failed"),
    (0x2012, "Partial Deletion"),
    (0x2013, "Store Not Available"),
    (0x2014, "Specification By Format Unsupported"),
    (0x2015, "No Valid Object Info"),
    (0x2016, "Invalid Code Format"),
    (0x2017, "Unknown Vendor Code"),
    (0x2018, "Capture Already Active"),
    (0x2019, "Device Busy"),
    (0x201A, "Invalid Parent Object"),
    (0x201B, "Invalid Device Property Format"),
    (0x201C, "Invalid Device Property Value"),
    (0x201D, "Invalid Parameter"),
    (0x201E, "Session Already Open"),
    (0x201F, "Transaction Cancelled"),
    (0x2020, "Specification Of Destination Unsupported"),
];

/// Canon vendor-extension response codes.
pub const CANON_RESPONSES: &[(u16, &str)] = &[
    (0xA001, "Unknown Command"),
    (0xA005, "Operation Refused"),
    (0xA006, "Lens Cover Close"),
    (0xA101, "Low Battery"),
    (0xA102, "Object Not Ready"),
    (0xA104, "Cannot Make Object"),
    (0xA105, "Memory Status Not Ready"),
    (0xA106, "Directory Creation Failed"),
    (0xA107, "Cancel All Transfers"),
    (0xA108, "Device Busy"),
];

/// Standard PTP event codes.
pub const STANDARD_EVENTS: &[(u16, &str)] = &[
    (0x4001, "CancelTransaction"),
    (0x4002, "ObjectAdded"),
    (0x4003, "ObjectRemoved"),
    (0x4004, "StoreAdded"),
    (0x4005, "StoreRemoved"),
    (0x4006, "DevicePropertyChanged"),
    (0x4007, "ObjectInfoChanged"),
    (0x4008, "DeviceInfoChanged"),
    (0x4009, "RequestObjectTransfer"),
    (0x400A, "StoreFull"),
    (0x400B, "DeviceReset"),
    (0x400C, "StorageInfoChanged"),
    (0x400D, "CaptureComplete"),
    (0x400E, "UnreportedStatus"),
];

/// Canon vendor-extension event codes.
pub const CANON_EVENTS: &[(u16, &str)] = &[
    (0xC181, "ObjectCreated"),
    (0xC182, "ObjectRemoved"),
    (0xC183, "RequestObjectTransfer"),
    (0xC184, "Shutdown"),
    (0xC185, "DeviceInfoChanged"),
    (0xC186, "CaptureCompleteImmediately"),
    (0xC187, "CameraStatusChanged"),
    (0xC188, "WillShutdown"),
    (0xC189, "ShutterButtonDown"),
    (0xC18A, "ShutterButtonUp"),
    (0xC18B, "BulbExposureTime"),
];

fn tables(domain: CodeDomain) -> (&'static [(u16, &'static str)], &'static [(u16, &'static str)]) {
    match domain {
        CodeDomain::Operation => (CANON_OPERATIONS, STANDARD_OPERATIONS),
        CodeDomain::Response => (CANON_RESPONSES, STANDARD_RESPONSES),
        CodeDomain::Event => (CANON_EVENTS, STANDARD_EVENTS),
    }
}

fn table_get(table: &'static [(u16, &'static str)], code: u16) -> Option<&'static str> {
    table
        .binary_search_by_key(&code, |&(value, _)| value)
        .ok()
        .map(|index| table[index].1)
}

/// Two-tier lookup: the vendor table shadows the standard table.
///
/// Returns `None` for codes absent from both tables; this is not an error.
pub fn lookup(domain: CodeDomain, code: u16) -> Option<(CodeOrigin, &'static str)> {
    let (vendor, standard) = tables(domain);
    if let Some(name) = table_get(vendor, code) {
        return Some((CodeOrigin::Canon, name));
    }
    table_get(standard, code).map(|name| (CodeOrigin::Standard, name))
}

/// Namespaced display name for a code, total over all u16 inputs.
///
/// # Examples
/// ```
/// use ptpscope_core::{CodeDomain, resolve_name};
///
/// assert_eq!(resolve_name(CodeDomain::Operation, 0x9116), "Canon::Capture");
/// assert_eq!(resolve_name(CodeDomain::Operation, 0x1002), "PTP::OpenSession");
/// assert_eq!(resolve_name(CodeDomain::Operation, 0xBEEF), "Unknown(0xBEEF)");
/// ```
pub fn resolve_name(domain: CodeDomain, code: u16) -> String {
    match lookup(domain, code) {
        Some((origin, name)) => format!("{}::{}", origin.namespace(), name),
        None => format!("Unknown(0x{code:04X})"),
    }
}

#[cfg(test)]
mod tests {
    use super::{CodeDomain, CodeOrigin, lookup, resolve_name};

    #[test]
    fn vendor_table_shadows_standard() {
        assert_eq!(
            lookup(CodeDomain::Operation, 0x9116),
            Some((CodeOrigin::Canon, "Capture"))
        );
        assert_eq!(
            lookup(CodeDomain::Response, 0xA108),
            Some((CodeOrigin::Canon, "Device Busy"))
        );
    }

    #[test]
    fn standard_fallback() {
        assert_eq!(resolve_name(CodeDomain::Response, 0x2001), "PTP::OK");
        assert_eq!(
            resolve_name(CodeDomain::Event, 0x400D),
            "PTP::CaptureComplete"
        );
    }

    #[test]
    fn unknown_codes_resolve_to_hex_label() {
        assert_eq!(resolve_name(CodeDomain::Operation, 0x0000), "Unknown(0x0000)");
        assert_eq!(resolve_name(CodeDomain::Event, 0xFFFF), "Unknown(0xFFFF)");
    }

    #[test]
    fn lookup_is_total_over_u16() {
        for domain in [CodeDomain::Operation, CodeDomain::Response, CodeDomain::Event] {
            for code in [0u16, 0x1001, 0x2001, 0x4001, 0x9116, 0xA001, 0xC181, u16::MAX] {
                let name = resolve_name(domain, code);
                assert!(!name.is_empty());
            }
        }
    }

    #[test]
    fn tables_are_sorted_for_binary_search() {
        for table in [
            super::STANDARD_OPERATIONS,
            super::CANON_OPERATIONS,
            super::STANDARD_RESPONSES,
            super::CANON_RESPONSES,
            super::STANDARD_EVENTS,
            super::CANON_EVENTS,
        ] {
            assert!(table.windows(2).all(|pair| pair[0].0 < pair[1].0));
        }
    }
}
