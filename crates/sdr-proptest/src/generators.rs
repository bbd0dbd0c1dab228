//! Data model generators for property-based testing.
//!
//! Provides both strategy functions (for use with `#[strategy(...)]`) and
//! `Arbitrary`-deriving types for common inputs. Generated text never
//! contains NUL, since a flat string ends at the first one.

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use sdr_types::{ArgInfo, ArgInfoList, ArgType, Kwargs, KwargsList, Range};
use test_strategy::Arbitrary;

/// Any argument type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum AnyArgType {
    #[weight(1)]
    Bool,
    #[weight(1)]
    Int,
    #[weight(1)]
    Float,
    #[weight(2)]
    String,
}

impl AnyArgType {
    pub fn arg_type(self) -> ArgType {
        match self {
            Self::Bool => ArgType::Bool,
            Self::Int => ArgType::Int,
            Self::Float => ArgType::Float,
            Self::String => ArgType::String,
        }
    }
}

/// Text without NUL bytes, including multi-byte characters.
pub fn text() -> impl Strategy<Value = String> {
    "[^\\x00]{0,24}"
}

/// A sequence of up to 12 texts.
pub fn text_list() -> impl Strategy<Value = Vec<String>> {
    vec(text(), 0..12)
}

/// A finite value, the kind a device reports for tuning limits.
pub fn finite_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        -1.0e10..1.0e10,
        proptest::num::f64::NORMAL | proptest::num::f64::SUBNORMAL,
    ]
}

/// A range with finite bounds and step. Bounds are not ordered.
pub fn range() -> impl Strategy<Value = Range> {
    (finite_f64(), finite_f64(), finite_f64())
        .prop_map(|(minimum, maximum, step)| Range::with_step(minimum, maximum, step))
}

/// A keyword map with up to 8 entries.
pub fn kwargs() -> impl Strategy<Value = Kwargs> {
    btree_map(text(), text(), 0..8)
}

/// A list of up to 6 keyword maps.
pub fn kwargs_list() -> impl Strategy<Value = KwargsList> {
    vec(kwargs(), 0..6)
}

/// A descriptor whose `options` and `option_names` have the same length.
pub fn arg_info() -> impl Strategy<Value = ArgInfo> {
    let labelled_options = vec((text(), text()), 0..6);
    (
        (text(), text(), text(), text(), text()),
        any::<AnyArgType>(),
        range(),
        labelled_options,
    )
        .prop_map(
            |((key, value, name, description, units), arg_type, range, labelled)| {
                let (options, option_names) = labelled.into_iter().unzip();
                ArgInfo {
                    key,
                    value,
                    name,
                    description,
                    units,
                    arg_type: arg_type.arg_type(),
                    range,
                    options,
                    option_names,
                }
            },
        )
}

/// A list of up to 5 descriptors.
pub fn arg_info_list() -> impl Strategy<Value = ArgInfoList> {
    vec(arg_info(), 0..5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn text_has_no_nul(#[strategy(text())] s: String) {
        assert!(!s.contains('\0'));
        assert!(s.chars().count() <= 24);
    }

    #[proptest]
    fn text_list_bounded(#[strategy(text_list())] strs: Vec<String>) {
        assert!(strs.len() < 12);
    }

    #[proptest]
    fn range_is_finite(#[strategy(range())] range: Range) {
        assert!(range.minimum().is_finite());
        assert!(range.maximum().is_finite());
        assert!(range.step().is_finite());
    }

    #[proptest]
    fn kwargs_bounded(#[strategy(kwargs())] args: Kwargs) {
        assert!(args.len() < 8);
    }

    #[proptest]
    fn arg_info_options_aligned(#[strategy(arg_info())] info: ArgInfo) {
        assert!(info.options_aligned());
        assert_eq!(info.options.len(), info.option_names.len());
    }

    #[proptest]
    fn arg_info_list_bounded(#[strategy(arg_info_list())] infos: ArgInfoList) {
        assert!(infos.len() < 5);
        assert!(infos.iter().all(ArgInfo::options_aligned));
    }

    #[proptest]
    fn arg_type_maps_distinctly(t: AnyArgType) {
        let expected = match t {
            AnyArgType::Bool => "bool",
            AnyArgType::Int => "int",
            AnyArgType::Float => "float",
            AnyArgType::String => "string",
        };
        assert_eq!(t.arg_type().to_string(), expected);
    }
}
