//! Captures the pointer and length of a single target field.

use fit_domain::error::FitResult;

use crate::pointer::MemoryPointer;

use super::{FieldContext, ParseSignal, Visitor};

/// Captures `(pointer, length)` the first time the parser visits
/// `(target_depth, target_position)`, then stops the walk.
///
/// Used to locate address ranges the caller needs to re-read later for its
/// own purposes (hashing the license body, re-reading the RSA signature)
/// rather than copying bytes out during the walk itself.
pub struct AddressCaptureVisitor<P> {
    target_depth: u8,
    target_position: u8,
    captured: Option<(P, u32)>,
}

impl<P: MemoryPointer + Clone> AddressCaptureVisitor<P> {
    #[must_use]
    pub const fn new(target_depth: u8, target_position: u8) -> Self {
        Self { target_depth, target_position, captured: None }
    }

    #[must_use]
    pub fn into_captured(self) -> Option<(P, u32)> {
        self.captured
    }
}

impl<P: MemoryPointer + Clone> Visitor<P> for AddressCaptureVisitor<P> {
    fn visit(&mut self, ctx: &FieldContext<'_, P>) -> FitResult<ParseSignal> {
        if ctx.depth == self.target_depth && ctx.position == self.target_position {
            self.captured = Some((ctx.pointer.clone(), ctx.length));
            return Ok(ParseSignal::Stop);
        }
        Ok(ParseSignal::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_object;
    use crate::pointer::SlicePointer;
    use fit_domain::registry::coord;

    #[test]
    fn captures_pointer_and_length_at_target_coordinate() {
        let mut bytes = vec![];
        bytes.extend_from_slice(&1u16.to_le_bytes()); // field_count
        bytes.extend_from_slice(&0u16.to_le_bytes()); // data-tail descriptor
        bytes.extend_from_slice(&4u32.to_le_bytes()); // length prefix
        bytes.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);

        let ptr = SlicePointer::new(&bytes);
        let mut visitor =
            AddressCaptureVisitor::new(coord::HEADER_LEVEL, coord::LICGEN_VERSION_FIELD);
        parse_object(&ptr, coord::HEADER_LEVEL, coord::LICGEN_VERSION_FIELD, &mut visitor).unwrap();

        let (captured_ptr, length) = visitor.into_captured().expect("field was visited");
        assert_eq!(length, 4);
        assert_eq!(captured_ptr.byte_at(0).unwrap(), 0xAA);
    }

    #[test]
    fn leaves_captured_none_when_target_never_visited() {
        let bytes = {
            let mut b = vec![];
            b.extend_from_slice(&0u16.to_le_bytes());
            b
        };
        let ptr = SlicePointer::new(&bytes);
        let mut visitor = AddressCaptureVisitor::new(5, 5);
        parse_object(&ptr, 0, 0, &mut visitor).unwrap();
        assert!(visitor.into_captured().is_none());
    }
}
