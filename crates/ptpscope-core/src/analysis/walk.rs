use thiserror::Error;

use crate::protocols::ptp::{Container, PtpError, decode_container, layout};

/// Why a trace walk stopped before the end of the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkErrorKind {
    #[error("{0}")]
    Decode(#[from] PtpError),
    #[error("declared length {length} below the 12-byte header")]
    MalformedLength { length: u32 },
}

/// Structured diagnostic tying a walk failure to a buffer offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkDiagnostic {
    pub offset: usize,
    pub kind: WalkErrorKind,
}

/// One item produced by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    Container { offset: usize, container: Container },
    Diagnostic(WalkDiagnostic),
}

/// Round an offset up to the next container boundary.
pub fn align_offset(offset: usize) -> usize {
    (offset + layout::CONTAINER_ALIGN - 1) & !(layout::CONTAINER_ALIGN - 1)
}

/// Single-pass iterator over the containers of a resident trace buffer.
///
/// The walk advances by each container's declared length, re-aligned to a
/// 4-byte boundary, and terminates on the first decode failure or
/// malformed declared length. A trailing fragment shorter than one header
/// ends the walk cleanly with no diagnostic. Construct a fresh walker to
/// traverse again.
pub struct TraceWalker<'a> {
    buffer: &'a [u8],
    offset: usize,
    pending: Option<WalkDiagnostic>,
    done: bool,
}

impl<'a> TraceWalker<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            pending: None,
            done: false,
        }
    }
}

impl Iterator for TraceWalker<'_> {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(diagnostic) = self.pending.take() {
            self.done = true;
            return Some(WalkEvent::Diagnostic(diagnostic));
        }
        if self.done {
            return None;
        }
        // The declared length may advance the offset past the end of the
        // buffer, so the remaining-byte count must saturate.
        if self.buffer.len().saturating_sub(self.offset) < layout::HEADER_LEN {
            self.done = true;
            return None;
        }

        let offset = self.offset;
        let container = match decode_container(&self.buffer[offset..]) {
            Ok(container) => container,
            Err(err) => {
                self.done = true;
                return Some(WalkEvent::Diagnostic(WalkDiagnostic {
                    offset,
                    kind: err.into(),
                }));
            }
        };

        if (container.length as usize) < layout::HEADER_LEN {
            // Yield the container first; the diagnostic follows and the
            // walk does not advance past the malformed declaration.
            self.pending = Some(WalkDiagnostic {
                offset,
                kind: WalkErrorKind::MalformedLength {
                    length: container.length,
                },
            });
        } else {
            self.offset = align_offset(offset + container.length as usize);
        }

        Some(WalkEvent::Container { offset, container })
    }
}

/// A fully collected walk: containers in wire order plus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContainer {
    pub offset: usize,
    pub container: Container,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceWalk {
    pub containers: Vec<DecodedContainer>,
    pub diagnostics: Vec<WalkDiagnostic>,
}

/// Walk an entire buffer and collect containers and diagnostics.
pub fn walk_trace(buffer: &[u8]) -> TraceWalk {
    let mut walk = TraceWalk::default();
    for event in TraceWalker::new(buffer) {
        match event {
            WalkEvent::Container { offset, container } => {
                walk.containers.push(DecodedContainer { offset, container });
            }
            WalkEvent::Diagnostic(diagnostic) => walk.diagnostics.push(diagnostic),
        }
    }
    walk
}
