//! Builds a [`crate::info::LicenseInfo`] projection from the parser's field
//! visits, keyed off the registry's tag ids rather than raw coordinates.

use fit_domain::config::InfoBuilderConfig;
use fit_domain::error::{FitResult, Status};
use fit_domain::registry::{self, FieldId, WireType};

use crate::info::{CounterInfo, LicPropInfo, LicenseInfo, PartInfo, ProductInfo, VendorInfo};
use crate::parser::{decode_data_tail_u32, decode_inline};
use crate::pointer::MemoryPointer;

use super::{FieldContext, ParseSignal, Visitor};

fn decode_integer<P: MemoryPointer>(ctx: &FieldContext<'_, P>) -> FitResult<u32> {
    if ctx.length == 2 {
        Ok(u32::from(decode_inline(ctx.pointer)?))
    } else {
        decode_data_tail_u32(ctx.pointer)
    }
}

fn decode_string<P: MemoryPointer>(ctx: &FieldContext<'_, P>) -> FitResult<String> {
    let bytes = ctx.pointer.read_vec(0, ctx.length)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Translates `(depth, position)` to a [`FieldId`] via the schema registry
/// and folds the field's decoded value into the [`LicenseInfo`] tree being
/// built, tracking which vendor/product/part/lic_prop is currently open by
/// watching each object's first-visited field (wire order guarantees a
/// record's own fields are visited in ascending position order).
pub struct InfoExtractVisitor<'cfg> {
    limits: &'cfg InfoBuilderConfig,
    info: LicenseInfo,
    feature_count: usize,
    counter_count: usize,
}

impl<'cfg> InfoExtractVisitor<'cfg> {
    #[must_use]
    pub fn new(limits: &'cfg InfoBuilderConfig) -> Self {
        Self { limits, info: LicenseInfo::default(), feature_count: 0, counter_count: 0 }
    }

    #[must_use]
    pub fn into_info(self) -> LicenseInfo {
        self.info
    }

    fn current_vendor_mut(&mut self) -> Option<&mut VendorInfo> {
        self.info.vendors.last_mut()
    }

    fn current_product_mut(&mut self) -> Option<&mut ProductInfo> {
        self.current_vendor_mut()?.product.as_mut()
    }

    fn current_part_mut(&mut self) -> Option<&mut PartInfo> {
        self.current_product_mut()?.parts.last_mut()
    }

    fn current_lic_prop_mut(&mut self) -> Option<&mut LicPropInfo> {
        self.current_part_mut()?.lic_prop.as_mut()
    }
}

impl<P: MemoryPointer> Visitor<P> for InfoExtractVisitor<'_> {
    fn visit(&mut self, ctx: &FieldContext<'_, P>) -> FitResult<ParseSignal> {
        let Some(field_id) = registry::field_id_at(ctx.depth, ctx.position) else {
            return Ok(ParseSignal::Continue);
        };

        match field_id {
            FieldId::LicgenVersion => self.info.licgen_version = decode_integer(ctx)?,
            FieldId::LmVersion => self.info.lm_version = decode_integer(ctx)?,
            FieldId::Uid => self.info.uid = decode_string(ctx)?,

            FieldId::VendorId => {
                self.info.vendors.push(VendorInfo { vendor_id: decode_integer(ctx)?, ..Default::default() });
            }
            FieldId::VendorName => {
                if let Some(vendor) = self.current_vendor_mut() {
                    vendor.vendor_name = Some(decode_string(ctx)?);
                }
            }
            FieldId::Product if ctx.wire_type == WireType::Object => {
                if let Some(vendor) = self.current_vendor_mut() {
                    vendor.product = Some(ProductInfo::default());
                }
            }

            FieldId::ProductId => {
                if let Some(product) = self.current_product_mut() {
                    product.product_id = decode_integer(ctx)?;
                }
            }
            FieldId::VersionRegex => {
                if let Some(product) = self.current_product_mut() {
                    product.version_regex = decode_string(ctx)?;
                }
            }

            FieldId::PartId => {
                if let Some(product) = self.current_product_mut() {
                    product.parts.push(PartInfo { part_id: decode_integer(ctx)?, ..Default::default() });
                }
            }
            FieldId::LicProp if ctx.wire_type == WireType::Object => {
                if let Some(part) = self.current_part_mut() {
                    part.lic_prop = Some(LicPropInfo::default());
                }
            }

            FieldId::FeatureId => {
                if self.feature_count >= self.limits.max_properties {
                    return Err(Status::InsufficientMemory);
                }
                self.feature_count += 1;
                if let Some(lic_prop) = self.current_lic_prop_mut() {
                    lic_prop.features.push(decode_integer(ctx)?);
                }
            }
            FieldId::Perpetual => {
                if let Some(lic_prop) = self.current_lic_prop_mut() {
                    lic_prop.perpetual = Some(decode_integer(ctx)? != 0);
                }
            }
            FieldId::StartDate => {
                if let Some(lic_prop) = self.current_lic_prop_mut() {
                    lic_prop.start_date = Some(decode_integer(ctx)?);
                }
            }
            FieldId::EndDate => {
                if let Some(lic_prop) = self.current_lic_prop_mut() {
                    lic_prop.end_date = Some(decode_integer(ctx)?);
                }
            }
            FieldId::DurationFromFirstUse => {
                if let Some(lic_prop) = self.current_lic_prop_mut() {
                    lic_prop.duration_from_first_use = Some(decode_integer(ctx)?);
                }
            }

            FieldId::CounterId => {
                if self.counter_count >= self.limits.max_counters {
                    return Err(Status::InsufficientMemory);
                }
                self.counter_count += 1;
                if let Some(lic_prop) = self.current_lic_prop_mut() {
                    lic_prop.counters.push(CounterInfo { counter_id: decode_integer(ctx)?, ..Default::default() });
                }
            }
            FieldId::Limit => {
                if let Some(lic_prop) = self.current_lic_prop_mut() {
                    if let Some(counter) = lic_prop.counters.last_mut() {
                        counter.limit = decode_integer(ctx)?;
                    }
                }
            }
            FieldId::SoftLimit => {
                if let Some(lic_prop) = self.current_lic_prop_mut() {
                    if let Some(counter) = lic_prop.counters.last_mut() {
                        counter.soft_limit = decode_integer(ctx)?;
                    }
                }
            }
            FieldId::Is => {
                if let Some(lic_prop) = self.current_lic_prop_mut() {
                    if let Some(counter) = lic_prop.counters.last_mut() {
                        counter.is_field = decode_integer(ctx)?;
                    }
                }
            }

            _ => {}
        }

        Ok(ParseSignal::Continue)
    }
}
