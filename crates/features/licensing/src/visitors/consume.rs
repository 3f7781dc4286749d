//! Locates the `lic_prop` object that grants a specific feature id.

use fit_domain::error::FitResult;
use fit_domain::registry::coord;

use crate::parser::decode_inline;
use crate::pointer::MemoryPointer;

use super::{FieldContext, ParseSignal, Visitor};

/// Walks a parsed license tracking the most recently entered `lic_prop`
/// object; when a `feature` whose `id_feature` matches `target_feature_id`
/// is found, remembers that `lic_prop`'s address and stops the walk.
///
/// Feature ids are always inline-encoded (bounded by
/// [`fit_domain::constants::MAX_FEATURE_ID_VALUE`], well under the inline
/// range), so this visitor only handles the inline form.
pub struct ConsumeVisitor<P> {
    target_feature_id: u32,
    current_lic_prop: Option<P>,
    found_lic_prop: Option<P>,
}

impl<P: MemoryPointer + Clone> ConsumeVisitor<P> {
    #[must_use]
    pub const fn new(target_feature_id: u32) -> Self {
        Self { target_feature_id, current_lic_prop: None, found_lic_prop: None }
    }

    #[must_use]
    pub fn into_found(self) -> Option<P> {
        self.found_lic_prop
    }
}

impl<P: MemoryPointer + Clone> Visitor<P> for ConsumeVisitor<P> {
    fn visit(&mut self, ctx: &FieldContext<'_, P>) -> FitResult<ParseSignal> {
        if ctx.depth == coord::PRODUCT_PART_LEVEL && ctx.position == coord::LIC_PROP_FIELD {
            self.current_lic_prop = Some(ctx.pointer.clone());
            return Ok(ParseSignal::Continue);
        }

        if ctx.depth == coord::FEATURE_LEVEL && ctx.position == coord::ID_FEATURE_FIELD {
            let id = u32::from(decode_inline(ctx.pointer)?);
            if id == self.target_feature_id {
                self.found_lic_prop = self.current_lic_prop.clone();
                return Ok(ParseSignal::Stop);
            }
        }

        Ok(ParseSignal::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::SlicePointer;

    fn inline_descriptor_bytes(value: u16) -> Vec<u8> {
        ((value + 1) * 2).to_le_bytes().to_vec()
    }

    #[test]
    fn records_lic_prop_address_then_matches_feature() {
        let lic_prop_bytes = [0xAAu8; 1];
        let lic_prop_ptr = SlicePointer::new(&lic_prop_bytes);
        let lic_prop_ctx = FieldContext {
            depth: coord::PRODUCT_PART_LEVEL,
            position: coord::LIC_PROP_FIELD,
            pointer: &lic_prop_ptr,
            length: 1,
            wire_type: fit_domain::registry::WireType::Object,
        };

        let feature_bytes = inline_descriptor_bytes(3);
        let feature_ptr = SlicePointer::new(&feature_bytes);
        let feature_ctx = FieldContext {
            depth: coord::FEATURE_LEVEL,
            position: coord::ID_FEATURE_FIELD,
            pointer: &feature_ptr,
            length: 2,
            wire_type: fit_domain::registry::WireType::Integer,
        };

        let mut visitor: ConsumeVisitor<SlicePointer<'_>> = ConsumeVisitor::new(3);
        assert_eq!(visitor.visit(&lic_prop_ctx).unwrap(), ParseSignal::Continue);
        assert_eq!(visitor.visit(&feature_ctx).unwrap(), ParseSignal::Stop);

        let found = visitor.into_found().expect("lic_prop recorded before match");
        assert_eq!(found.byte_at(0).unwrap(), 0xAA);
    }

    #[test]
    fn no_match_leaves_found_empty() {
        let feature_bytes = inline_descriptor_bytes(5);
        let feature_ptr = SlicePointer::new(&feature_bytes);
        let feature_ctx = FieldContext {
            depth: coord::FEATURE_LEVEL,
            position: coord::ID_FEATURE_FIELD,
            pointer: &feature_ptr,
            length: 2,
            wire_type: fit_domain::registry::WireType::Integer,
        };

        let mut visitor: ConsumeVisitor<SlicePointer<'_>> = ConsumeVisitor::new(99);
        assert_eq!(visitor.visit(&feature_ctx).unwrap(), ParseSignal::Continue);
        assert!(visitor.into_found().is_none());
    }
}
