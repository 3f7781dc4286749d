//! Recursive-descent wire parser.
//!
//! Walks a schema tree whose only self-description is the odd/even bit of
//! each field descriptor; everything else about a field's shape is looked up
//! in the frozen [`fit_domain::registry`] tables by `(depth, position)`. See
//! the schema tree note in this crate's design notes for why a field's
//! starting position is threaded through recursion rather than reset to 0.

use fit_domain::constants::{MAX_INDEX, MAX_LEVEL, RSA_SIG_SIZE};
use fit_domain::error::{FitResult, Status};
use fit_domain::registry::{self, WireType, coord};

use crate::pointer::MemoryPointer;
use crate::visitors::{FieldContext, ParseSignal, Visitor};

enum Descriptor {
    /// Value lives in the data tail.
    DataTail,
    /// Skip this many consecutive positions.
    Skip(u8),
    /// Inline integer, already decoded.
    Inline(u16),
}

fn decode_descriptor(d: u16) -> Descriptor {
    if d == 0 {
        Descriptor::DataTail
    } else if d % 2 == 1 {
        Descriptor::Skip((((d as u32 + 1) / 2) & 0xFF) as u8)
    } else {
        Descriptor::Inline(d / 2 - 1)
    }
}

fn check_coordinate(depth: u8, position: u8) -> FitResult<()> {
    if depth as usize >= MAX_LEVEL || position as usize >= MAX_INDEX {
        return Err(Status::InvalidParam2);
    }
    Ok(())
}

fn check_string_length(depth: u8, position: u8, length: u32) -> FitResult<()> {
    let is_rsa_signature =
        depth == coord::SIGNATURE_LEVEL && position == coord::RSA_SIGNATURE_FIELD;
    let ok = if is_rsa_signature { length as usize == RSA_SIG_SIZE } else { length <= 32 };
    if ok { Ok(()) } else { Err(Status::InvalidFieldLength) }
}

/// Parses one object's fields, starting the running position counter at
/// `start_pos`, dispatching each field occurrence to `visitor`.
///
/// # Errors
/// Returns the first FATAL status raised by a malformed field, an
/// out-of-bounds coordinate, or the visitor itself.
pub fn parse_object<P: MemoryPointer, V: Visitor<P>>(
    ptr: &P,
    depth: u8,
    start_pos: u8,
    visitor: &mut V,
) -> FitResult<ParseSignal> {
    let field_count = ptr.u16_le(0)?;
    let header_offset = u32::from(field_count + 1) * 2;
    let mut data_tail_offset = header_offset;
    let mut pos = start_pos;

    for i in 0..field_count {
        let descriptor_offset = 2 + u32::from(i) * 2;
        let d = ptr.u16_le(descriptor_offset)?;

        tracing::trace!(depth, pos, descriptor = d, "parsing field descriptor");

        match decode_descriptor(d) {
            Descriptor::Skip(n) => {
                pos = pos.saturating_add(n);
            }
            Descriptor::Inline(_) => {
                // The decoded value is recoverable by the visitor by reading
                // the descriptor bytes `pointer` points at and applying the
                // same `d / 2 - 1` transform.
                check_coordinate(depth, pos)?;
                let field_ptr = ptr.advance(descriptor_offset);
                let ctx = FieldContext {
                    depth,
                    position: pos,
                    pointer: &field_ptr,
                    length: 2,
                    wire_type: WireType::Integer,
                };
                if let ParseSignal::Stop = visitor.visit(&ctx)? {
                    return Ok(ParseSignal::Stop);
                }
                pos += 1;
            }
            Descriptor::DataTail => {
                check_coordinate(depth, pos)?;
                let wire_type = registry::wire_type_at(depth, pos);
                let length = ptr.u32_le(data_tail_offset)?;
                let payload_ptr = ptr.advance(data_tail_offset + 4);

                match wire_type {
                    WireType::Integer => {
                        let ctx = FieldContext {
                            depth,
                            position: pos,
                            pointer: &payload_ptr,
                            length,
                            wire_type,
                        };
                        if let ParseSignal::Stop = visitor.visit(&ctx)? {
                            return Ok(ParseSignal::Stop);
                        }
                        pos += 1;
                    }
                    WireType::String => {
                        check_string_length(depth, pos, length)?;
                        let ctx = FieldContext {
                            depth,
                            position: pos,
                            pointer: &payload_ptr,
                            length,
                            wire_type,
                        };
                        if let ParseSignal::Stop = visitor.visit(&ctx)? {
                            return Ok(ParseSignal::Stop);
                        }
                        pos += 1;
                    }
                    WireType::Object => {
                        // `length` here is the object's real declared byte span, not a
                        // fixed marker: address-capture visitors need it to slice out
                        // exactly this sub-object's bytes (e.g. for hashing the license
                        // body), so the notification carries the true span rather than
                        // a constant placeholder.
                        let notify_ctx = FieldContext {
                            depth,
                            position: pos,
                            pointer: &payload_ptr,
                            length,
                            wire_type,
                        };
                        if let ParseSignal::Stop = visitor.visit(&notify_ctx)? {
                            return Ok(ParseSignal::Stop);
                        }
                        if let ParseSignal::Stop = parse_object(&payload_ptr, depth + 1, 0, visitor)? {
                            return Ok(ParseSignal::Stop);
                        }
                        pos += 1;
                    }
                    WireType::Array => {
                        let notify_ctx = FieldContext {
                            depth,
                            position: pos,
                            pointer: &payload_ptr,
                            length,
                            wire_type,
                        };
                        if let ParseSignal::Stop = visitor.visit(&notify_ctx)? {
                            return Ok(ParseSignal::Stop);
                        }
                        if let ParseSignal::Stop = parse_array(&payload_ptr, depth + 1, visitor)? {
                            return Ok(ParseSignal::Stop);
                        }
                        pos += 1;
                    }
                    WireType::Invalid => return Err(Status::InvalidWireType),
                }

                data_tail_offset += 4 + length;
            }
        }
    }

    Ok(ParseSignal::Continue)
}

/// Walks an array body: a 32-bit total length followed by a concatenation of
/// `(element_length: u32, element_object_bytes)` pairs. Every element is
/// parsed as an object starting its own position counter at 0 — the
/// element's own field descriptors carry whatever skip is needed to reach
/// its real starting position in the shared per-depth coordinate space.
fn parse_array<P: MemoryPointer, V: Visitor<P>>(
    ptr: &P,
    depth: u8,
    visitor: &mut V,
) -> FitResult<ParseSignal> {
    let total_len = ptr.u32_le(0)?;
    let mut consumed = 0u32;
    let mut cursor = 4u32;

    while consumed < total_len {
        let element_len = ptr.u32_le(cursor)?;
        let element_ptr = ptr.advance(cursor + 4);
        if let ParseSignal::Stop = parse_object(&element_ptr, depth, 0, visitor)? {
            return Ok(ParseSignal::Stop);
        }
        cursor += 4 + element_len;
        consumed += 4 + element_len;
    }

    Ok(ParseSignal::Continue)
}

/// Decodes an inline-integer field's value from the descriptor bytes a
/// visitor's `pointer` points at (`d / 2 - 1`; the wire carries `2*(value+1)`).
///
/// # Errors
/// Propagates the pointer's read error.
pub fn decode_inline(ptr: &impl MemoryPointer) -> FitResult<u16> {
    let d = ptr.u16_le(0)?;
    Ok(d / 2 - 1)
}

/// Reads a 32-bit data-tail integer field as-is.
///
/// Most data-tail integers (start/end date, `lc_id`) are stored verbatim,
/// unlike inline integers, which carry the `/2-1` encoding.
///
/// # Errors
/// Propagates the pointer's read error.
pub fn decode_data_tail_u32(ptr: &impl MemoryPointer) -> FitResult<u32> {
    ptr.u32_le(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::SlicePointer;

    struct CountingVisitor {
        visits: Vec<(u8, u8, WireType)>,
    }

    impl<P: MemoryPointer> Visitor<P> for CountingVisitor {
        fn visit(&mut self, ctx: &FieldContext<'_, P>) -> FitResult<ParseSignal> {
            self.visits.push((ctx.depth, ctx.position, ctx.wire_type));
            Ok(ParseSignal::Continue)
        }
    }

    /// Builds a minimal object with one inline-integer field at position 0:
    /// descriptor `d = (value + 1) * 2`.
    fn encode_object_with_inline(position_skip: u16, value: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        let descriptors: Vec<u16> = if position_skip == 0 {
            vec![(value + 1) * 2]
        } else {
            vec![position_skip * 2 + 1, (value + 1) * 2]
        };
        bytes.extend_from_slice(&(descriptors.len() as u16).to_le_bytes());
        for d in &descriptors {
            bytes.extend_from_slice(&d.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn inline_integer_decodes_and_visits_at_position_zero() {
        let data = encode_object_with_inline(0, 41);
        let ptr = SlicePointer::new(&data);
        let mut visitor = CountingVisitor { visits: Vec::new() };
        parse_object(&ptr, 0, 0, &mut visitor).unwrap();
        assert_eq!(visitor.visits, vec![(0, 0, WireType::Integer)]);
    }

    #[test]
    fn skip_descriptor_advances_position_before_next_field() {
        // skip 1 position, then an inline integer lands at position 1.
        let data = encode_object_with_inline(1, 7);
        let ptr = SlicePointer::new(&data);
        let mut visitor = CountingVisitor { visits: Vec::new() };
        parse_object(&ptr, 0, 0, &mut visitor).unwrap();
        assert_eq!(visitor.visits, vec![(0, 1, WireType::Integer)]);
    }

    #[test]
    fn data_tail_string_round_trips_length_and_bytes() {
        // One descriptor (d=0) for a position-0 string field (license_field
        // is actually an object in the schema; we fabricate a standalone
        // coordinate-free test by parsing directly at a depth/position the
        // registry doesn't constrain beyond bounds-checking).
        let mut bytes = vec![];
        bytes.extend_from_slice(&1u16.to_le_bytes()); // field_count
        bytes.extend_from_slice(&0u16.to_le_bytes()); // descriptor: data tail
        bytes.extend_from_slice(&3u32.to_le_bytes()); // length prefix
        bytes.extend_from_slice(b"abc");

        let ptr = SlicePointer::new(&bytes);
        let mut visitor = CountingVisitor { visits: Vec::new() };
        // header depth/position: use header's licgen_version slot (Integer)
        // to avoid the test depending on registry contents for a String type;
        // wire type is read straight from the registry at (HEADER_LEVEL, 0).
        parse_object(&ptr, coord::HEADER_LEVEL, coord::LICGEN_VERSION_FIELD, &mut visitor).unwrap();
        assert_eq!(visitor.visits, vec![(coord::HEADER_LEVEL, coord::LICGEN_VERSION_FIELD, WireType::Integer)]);
    }

    #[test]
    fn out_of_bounds_depth_is_fatal() {
        let data = encode_object_with_inline(0, 1);
        let ptr = SlicePointer::new(&data);
        let mut visitor = CountingVisitor { visits: Vec::new() };
        let err = parse_object(&ptr, 200, 0, &mut visitor).unwrap_err();
        assert_eq!(err, Status::InvalidParam2);
    }
}
