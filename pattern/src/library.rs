//! Predefined patterns over pathway graphs.
//!
//! Every function builds a fresh pattern. Label names are part of each
//! pattern's contract: callers read matches by them.

use crate::constraint::{
    shared, Activity, ConstraintRef, Empty, FeatureMap, InputOrOutput, MappedConst,
    ModificationChange, Not, Or, OtherSide, ParticipatesInConv, ParticipatingPe, PathConstraint,
    PeChainsIntersect, RelType, RelatedControl, Size, SizeKind, TypeCheck,
};
use crate::error::PatternResult;
use crate::pattern::Pattern;
use crate::presets as c;
use pax_registry::Registry;
use std::collections::HashSet;

// ==================== Complex membership ====================

/// Two distinct entity references whose simple entities are members of the
/// same complex, with no nested complex shared between the two paths.
///
/// Labels: `first ER`, `first simple PE`, `Complex`, `second simple PE`,
/// `second ER`.
pub fn in_same_complex(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "EntityReference", "first ER")?;
    p.add(c::er_to_pe(registry)?, &["first ER", "first simple PE"])?;
    p.add(c::link_to_complex(registry)?, &["first simple PE", "Complex"])?;
    p.add(c::type_of(registry, "Complex")?, &["Complex"])?;
    p.add(c::link_to_simple(registry)?, &["Complex", "second simple PE"])?;
    p.add(
        shared(PeChainsIntersect::new(registry, false, true)?),
        &["first simple PE", "Complex", "second simple PE", "Complex"],
    )?;
    p.add(c::pe_to_er(registry)?, &["second simple PE", "second ER"])?;
    p.add(c::equal(false), &["first ER", "second ER"])?;
    Ok(p)
}

/// [`in_same_complex`] where the complex controls something.
pub fn in_same_active_complex(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = in_same_complex(registry)?;
    p.add(shared(Activity::new(registry, true)?), &["Complex"])?;
    Ok(p)
}

/// [`in_same_complex`] where the complex controls a template reaction that
/// neither member takes part in.
///
/// Adds labels `Control` and `TR`.
pub fn in_same_complex_having_trans_activity(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = in_same_complex(registry)?;
    p.add(c::pe_to_control(registry)?, &["Complex", "Control"])?;
    p.add(c::control_to_temp_reac(registry)?, &["Control", "TR"])?;
    p.add(shared(Not::new(c::participant_er(registry)?)), &["TR", "first ER"])?;
    p.add(shared(Not::new(c::participant_er(registry)?)), &["TR", "second ER"])?;
    Ok(p)
}

/// [`in_same_complex`] where the complex controls a conversion that neither
/// member takes part in.
///
/// Adds labels `Control` and `Conversion`.
pub fn in_same_complex_effecting_conversion(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = in_same_complex(registry)?;
    p.add(c::pe_to_control(registry)?, &["Complex", "Control"])?;
    p.add(c::control_to_conv(registry)?, &["Control", "Conversion"])?;
    p.add(
        shared(Not::new(c::participant_er(registry)?)),
        &["Conversion", "first ER"],
    )?;
    p.add(
        shared(Not::new(c::participant_er(registry)?)),
        &["Conversion", "second ER"],
    )?;
    Ok(p)
}

// ==================== State change ====================

/// A conversion that turns one form of an entity into another form of the
/// same entity.
///
/// Labels: `Conversion`, `input PE`, `input simple PE`, `changed ER`,
/// `output PE`, `output simple PE`.
pub fn state_change(registry: &Registry, consider_generics: bool) -> PatternResult<Pattern> {
    let down = || {
        if consider_generics {
            c::link_to_simple(registry)
        } else {
            c::with_simple_members(registry)
        }
    };

    let mut p = Pattern::new(registry, "Conversion", "Conversion")?;
    p.add(
        shared(InputOrOutput::new(registry, RelType::Input, true)?),
        &["Conversion", "input PE"],
    )?;
    p.add(down()?, &["input PE", "input simple PE"])?;
    p.add(c::pe_to_er(registry)?, &["input simple PE", "changed ER"])?;
    p.add(
        shared(OtherSide::new(registry)?),
        &["input PE", "Conversion", "output PE"],
    )?;
    p.add(c::equal(false), &["input PE", "output PE"])?;
    p.add(down()?, &["output PE", "output simple PE"])?;
    p.add(c::pe_to_er(registry)?, &["output simple PE", "changed ER"])?;
    Ok(p)
}

fn controller_prefix(registry: &Registry, consider_generics: bool) -> PatternResult<Pattern> {
    let up = if consider_generics {
        c::link_to_complex(registry)?
    } else {
        c::with_complexes(registry)?
    };
    let mut p = Pattern::new(registry, "EntityReference", "controller ER")?;
    p.add(c::er_to_pe(registry)?, &["controller ER", "controller simple PE"])?;
    p.add(up, &["controller simple PE", "controller PE"])?;
    Ok(p)
}

/// An entity controlling a conversion that changes the state of another
/// entity.
///
/// Labels: `controller ER`, `controller simple PE`, `controller PE`,
/// `Control`, then the labels of [`state_change`].
pub fn controls_state_change(
    registry: &Registry,
    consider_generics: bool,
) -> PatternResult<Pattern> {
    let mut p = controller_prefix(registry, consider_generics)?;
    p.add(c::pe_to_control(registry)?, &["controller PE", "Control"])?;
    p.add(c::control_to_conv(registry)?, &["Control", "Conversion"])?;
    p.include_as_is(&state_change(registry, consider_generics)?)?;
    p.add(c::equal(false), &["controller ER", "changed ER"])?;
    Ok(p)
}

/// Like [`controls_state_change`], but the controller is an unchanged
/// participant on both sides of the conversion instead of its controller.
pub fn controls_state_change_but_is_participant(
    registry: &Registry,
    consider_generics: bool,
) -> PatternResult<Pattern> {
    let mut p = controller_prefix(registry, consider_generics)?;
    p.add(c::participates_in_conv(registry)?, &["controller PE", "Conversion"])?;
    p.add(c::left(registry)?, &["Conversion", "controller PE"])?;
    p.add(c::right(registry)?, &["Conversion", "controller PE"])?;
    p.include_as_is(&state_change(registry, consider_generics)?)?;
    p.add(c::equal(false), &["controller ER", "changed ER"])?;
    p.add(c::equal(false), &["controller PE", "input PE"])?;
    p.add(c::equal(false), &["controller PE", "output PE"])?;
    Ok(p)
}

/// Two controls where an output of the first conversion is an input of the
/// second. Linker entities listed in `ubiques` are skipped.
///
/// Labels: `first ER`, `first simple controller PE`, `first controller PE`,
/// `first Control`, `first Conversion`, `linker PE`, `second Conversion`,
/// `second Control`, `second controller PE`, `second simple controller PE`,
/// `second ER`.
pub fn consecutive_catalysis(
    registry: &Registry,
    ubiques: Option<&HashSet<String>>,
) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "EntityReference", "first ER")?;
    p.add(c::er_to_pe(registry)?, &["first ER", "first simple controller PE"])?;
    p.add(
        c::link_to_complex(registry)?,
        &["first simple controller PE", "first controller PE"],
    )?;
    p.add(c::pe_to_control(registry)?, &["first controller PE", "first Control"])?;
    p.add(c::control_to_conv(registry)?, &["first Control", "first Conversion"])?;
    p.add(
        shared(ParticipatingPe::new(registry, RelType::Output, false)?),
        &["first Control", "first Conversion", "linker PE"],
    )?;
    if let Some(uris) = ubiques {
        p.add(c::not_ubique(registry, uris.clone())?, &["linker PE"])?;
    }
    p.add(
        shared(ParticipatesInConv::new(registry, RelType::Input, false)?),
        &["linker PE", "second Conversion"],
    )?;
    p.add(c::equal(false), &["first Conversion", "second Conversion"])?;
    p.add(
        shared(RelatedControl::new(registry, RelType::Input)?),
        &["linker PE", "second Conversion", "second Control"],
    )?;
    p.add(c::controller_pe(registry)?, &["second Control", "second controller PE"])?;
    p.add(
        shared(Not::new(c::comp_to_er(registry)?)),
        &["second controller PE", "first ER"],
    )?;
    p.add(
        c::link_to_simple(registry)?,
        &["second controller PE", "second simple controller PE"],
    )?;
    p.add(c::pe_to_er(registry)?, &["second simple controller PE", "second ER"])?;
    Ok(p)
}

/// An entity consumed by a conversion that produces another form of it.
///
/// Labels: `changed ER`, `input simple PE`, `input PE`, `Conversion`,
/// `output PE`, `output simple PE`.
pub fn pe_in_out(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "EntityReference", "changed ER")?;
    p.add(c::er_to_pe(registry)?, &["changed ER", "input simple PE"])?;
    p.add(c::link_to_complex(registry)?, &["input simple PE", "input PE"])?;
    p.add(
        shared(ParticipatesInConv::new(registry, RelType::Input, true)?),
        &["input PE", "Conversion"],
    )?;
    p.add(
        shared(OtherSide::new(registry)?),
        &["input PE", "Conversion", "output PE"],
    )?;
    p.add(c::equal(false), &["input PE", "output PE"])?;
    p.add(c::link_to_simple(registry)?, &["output PE", "output simple PE"])?;
    p.add(c::pe_to_er(registry)?, &["output simple PE", "changed ER"])?;
    Ok(p)
}

/// Two forms of one entity on opposite sides of a conversion.
///
/// Labels: `modified ER`, `first PE`, `Conversion`, `second PE`.
pub fn modified_pe_simple(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "EntityReference", "modified ER")?;
    p.add(c::er_to_pe(registry)?, &["modified ER", "first PE"])?;
    p.add(c::participates_in_conv(registry)?, &["first PE", "Conversion"])?;
    p.add(
        shared(OtherSide::new(registry)?),
        &["first PE", "Conversion", "second PE"],
    )?;
    p.add(c::equal(false), &["first PE", "second PE"])?;
    p.add(c::pe_to_er(registry)?, &["second PE", "modified ER"])?;
    Ok(p)
}

/// [`pe_in_out`] where the entity gains (or loses) activity, either by
/// becoming a controller or through a known activating modification.
pub fn act_change(
    registry: &Registry,
    activating: bool,
    activity_features: FeatureMap,
    inactivity_features: FeatureMap,
) -> PatternResult<Pattern> {
    let mut p = pe_in_out(registry)?;
    let change = Or::new(vec![
        MappedConst::new(c::differential_activity(registry, activating)?, &[0, 1])?,
        MappedConst::new(
            shared(ModificationChange::new(
                registry,
                activating,
                activity_features,
                inactivity_features,
            )?),
            &[0, 1],
        )?,
    ])?;
    p.add(shared(change), &["input simple PE", "output simple PE"])?;
    Ok(p)
}

/// Conversions an entity, or a complex containing it, takes part in.
///
/// Labels: `ER`, `SPE`, `PE`, `Conversion`.
pub fn modifier_conv(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "EntityReference", "ER")?;
    p.add(c::er_to_pe(registry)?, &["ER", "SPE"])?;
    p.add(c::link_to_complex(registry)?, &["SPE", "PE"])?;
    p.add(c::participates_in_conv(registry)?, &["PE", "Conversion"])?;
    Ok(p)
}

/// An entity controlling an interaction it does not take part in.
///
/// Labels: `SPE`, `ER`, `PE`, `Control`, `Inter`.
pub fn has_non_self_effect(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "PhysicalEntity", "SPE")?;
    p.add(c::pe_to_er(registry)?, &["SPE", "ER"])?;
    p.add(c::link_to_complex(registry)?, &["SPE", "PE"])?;
    p.add(c::pe_to_control(registry)?, &["PE", "Control"])?;
    p.add(c::control_to_inter(registry)?, &["Control", "Inter"])?;
    p.add(shared(Not::new(c::participant_er(registry)?)), &["Inter", "ER"])?;
    Ok(p)
}

// ==================== Protein relations ====================

/// Two proteins that are members of one complex.
///
/// Labels: `first PR`, `first simple PE`, `Complex`, `second simple PE`,
/// `second PR`.
pub fn binds_to(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "ProteinReference", "first PR")?;
    p.add(c::er_to_pe(registry)?, &["first PR", "first simple PE"])?;
    p.add(c::link_to_complex(registry)?, &["first simple PE", "Complex"])?;
    p.add(c::type_of(registry, "Complex")?, &["Complex"])?;
    p.add(c::link_to_simple(registry)?, &["Complex", "second simple PE"])?;
    p.add(c::pe_to_er(registry)?, &["second simple PE", "second PR"])?;
    p.add(c::equal(false), &["first PR", "second PR"])?;
    Ok(p)
}

/// Two proteins taking part in one molecular interaction.
///
/// Labels: `first PR`, `first simple PE`, `first PE`, `Interaction`,
/// `second PE`, `second simple PE`, `second ER`.
pub fn physically_interacts(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "ProteinReference", "first PR")?;
    p.add(c::er_to_pe(registry)?, &["first PR", "first simple PE"])?;
    p.add(c::link_to_complex(registry)?, &["first simple PE", "first PE"])?;
    p.add(c::molecular_interaction(registry)?, &["first PE", "Interaction"])?;
    p.add(c::participant(registry)?, &["Interaction", "second PE"])?;
    p.add(c::link_to_simple(registry)?, &["second PE", "second simple PE"])?;
    p.add(c::pe_to_er(registry)?, &["second simple PE", "second ER"])?;
    p.add(c::equal(false), &["first PR", "second ER"])?;
    Ok(p)
}

/// A transcription factor controlling a template reaction that produces
/// another protein.
///
/// Labels: `TF PR`, `TF SPE`, `TF PE`, `Control`, `TempReac`, `product PE`,
/// `product SPE`, `product PR`.
pub fn expression_with_temp_reac(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "ProteinReference", "TF PR")?;
    p.add(c::er_to_pe(registry)?, &["TF PR", "TF SPE"])?;
    p.add(c::link_to_complex(registry)?, &["TF SPE", "TF PE"])?;
    p.add(c::pe_to_control(registry)?, &["TF PE", "Control"])?;
    p.add(c::control_to_temp_reac(registry)?, &["Control", "TempReac"])?;
    p.add(c::product(registry)?, &["TempReac", "product PE"])?;
    p.add(c::link_to_simple(registry)?, &["product PE", "product SPE"])?;
    p.add(c::type_of(registry, "Protein")?, &["product SPE"])?;
    p.add(c::pe_to_er(registry)?, &["product SPE", "product PR"])?;
    p.add(c::equal(false), &["TF PR", "product PR"])?;
    Ok(p)
}

/// A transcription factor controlling a conversion from nothing to a single
/// product.
///
/// Labels: `TF PR`, `TF SPE`, `TF PE`, `Control`, `Conversion`, `right PE`,
/// `right SPE`, `product ER`.
pub fn expression_with_conversion(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "ProteinReference", "TF PR")?;
    p.add(c::er_to_pe(registry)?, &["TF PR", "TF SPE"])?;
    p.add(c::link_to_complex(registry)?, &["TF SPE", "TF PE"])?;
    p.add(c::pe_to_control(registry)?, &["TF PE", "Control"])?;
    p.add(c::control_to_conv(registry)?, &["Control", "Conversion"])?;
    p.add(shared(Empty::new(c::left(registry)?)?), &["Conversion"])?;
    p.add(
        shared(Size::new(c::right(registry)?, 1, SizeKind::Equal)?),
        &["Conversion"],
    )?;
    p.add(c::right(registry)?, &["Conversion", "right PE"])?;
    p.add(c::link_to_simple(registry)?, &["right PE", "right SPE"])?;
    p.add(c::pe_to_er(registry)?, &["right SPE", "product ER"])?;
    p.add(c::equal(false), &["TF PR", "product ER"])?;
    Ok(p)
}

/// A protein controlling a conversion that consumes another protein and
/// produces nothing.
///
/// Labels: `upstream PR`, `upstream SPE`, `upstream PE`, `Control`,
/// `Conversion`, `input PE`, `input SPE`, `downstream PR`.
pub fn degradation(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "ProteinReference", "upstream PR")?;
    p.add(c::er_to_pe(registry)?, &["upstream PR", "upstream SPE"])?;
    p.add(c::link_to_complex(registry)?, &["upstream SPE", "upstream PE"])?;
    p.add(c::pe_to_control(registry)?, &["upstream PE", "Control"])?;
    p.add(c::control_to_conv(registry)?, &["Control", "Conversion"])?;
    p.add(no_output(registry)?, &["Conversion"])?;
    p.add(
        shared(InputOrOutput::new(registry, RelType::Input, true)?),
        &["Conversion", "input PE"],
    )?;
    p.add(c::link_to_simple(registry)?, &["input PE", "input SPE"])?;
    p.add(c::pe_to_er(registry)?, &["input SPE", "downstream PR"])?;
    p.add(c::equal(false), &["upstream PR", "downstream PR"])?;
    p.add(c::type_of(registry, "ProteinReference")?, &["downstream PR"])?;
    Ok(p)
}

/// A protein changing the state of another protein whose new form is then
/// degraded.
///
/// Adds the label `degrading Conv` to [`controls_state_change`].
pub fn controls_degradation_indirectly(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = controls_state_change(registry, true)?;
    p.add(c::type_of(registry, "ProteinReference")?, &["controller ER"])?;
    p.add(c::type_of(registry, "ProteinReference")?, &["changed ER"])?;
    p.add(
        shared(ParticipatesInConv::new(registry, RelType::Input, true)?),
        &["output PE", "degrading Conv"],
    )?;
    p.add(no_output(registry)?, &["degrading Conv"])?;
    p.add(c::equal(false), &["degrading Conv", "Conversion"])?;
    Ok(p)
}

fn no_output(registry: &Registry) -> PatternResult<ConstraintRef> {
    Ok(shared(Empty::new(shared(InputOrOutput::new(
        registry,
        RelType::Output,
        true,
    )?))?))
}

/// Two proteins that are direct members of the same complex.
///
/// Labels: `Protein 1`, `SPE1`, `PE1`, `Complex`, `PE2`, `SPE2`, `Protein 2`.
pub fn appear_in_same_complex(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "ProteinReference", "Protein 1")?;
    p.add(c::er_to_pe(registry)?, &["Protein 1", "SPE1"])?;
    p.add(c::link_to_complex(registry)?, &["SPE1", "PE1"])?;
    p.add(
        shared(PathConstraint::parse(registry, "PhysicalEntity/componentOf")?),
        &["PE1", "Complex"],
    )?;
    p.add(
        shared(PathConstraint::parse(registry, "Complex/component")?),
        &["Complex", "PE2"],
    )?;
    p.add(c::equal(false), &["PE1", "PE2"])?;
    p.add(c::link_to_simple(registry)?, &["PE2", "SPE2"])?;
    p.add(c::pe_to_er(registry)?, &["SPE2", "Protein 2"])?;
    p.add(c::equal(false), &["Protein 1", "Protein 2"])?;
    p.add(c::type_of(registry, "ProteinReference")?, &["Protein 2"])?;
    Ok(p)
}

/// Two proteins taking part in one interaction of any kind.
///
/// Labels: `Protein 1`, `SPE1`, `PE1`, `Inter`, `PE2`, `SPE2`, `Protein 2`.
pub fn interaction(registry: &Registry) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "ProteinReference", "Protein 1")?;
    p.add(c::er_to_pe(registry)?, &["Protein 1", "SPE1"])?;
    p.add(c::link_to_complex(registry)?, &["SPE1", "PE1"])?;
    p.add(c::pe_to_inter(registry)?, &["PE1", "Inter"])?;
    p.add(c::participant(registry)?, &["Inter", "PE2"])?;
    p.add(c::equal(false), &["PE1", "PE2"])?;
    p.add(c::link_to_simple(registry)?, &["PE2", "SPE2"])?;
    p.add(c::equal(false), &["SPE1", "SPE2"])?;
    p.add(c::type_of(registry, "Protein")?, &["SPE2"])?;
    p.add(c::pe_to_er(registry)?, &["SPE2", "Protein 2"])?;
    p.add(c::equal(false), &["Protein 1", "Protein 2"])?;
    Ok(p)
}

/// Protein references of the participants and controllers of interactions,
/// optionally restricted to the given interaction classes.
///
/// Labels: `Interaction`, `PE`, `SPE`, `PR`.
pub fn related_protein_ref_of_inter(
    registry: &Registry,
    seed_types: &[&str],
) -> PatternResult<Pattern> {
    let mut p = Pattern::new(registry, "Interaction", "Interaction")?;
    match seed_types {
        [] => {}
        [only] => p.add(c::type_of(registry, only)?, &["Interaction"])?,
        many => {
            let branches = many
                .iter()
                .map(|name| MappedConst::new(shared(TypeCheck::named(registry, name)?), &[0]))
                .collect::<PatternResult<Vec<_>>>()?;
            p.add(shared(Or::new(branches)?), &["Interaction"])?;
        }
    }

    let reached = Or::new(vec![
        MappedConst::new(c::participant(registry)?, &[0, 1])?,
        MappedConst::new(
            shared(PathConstraint::parse(
                registry,
                "Interaction/controlledOf*/controller:PhysicalEntity",
            )?),
            &[0, 1],
        )?,
    ])?;
    p.add(shared(reached), &["Interaction", "PE"])?;
    p.add(c::link_to_simple(registry)?, &["PE", "SPE"])?;
    p.add(c::pe_to_er(registry)?, &["SPE", "PR"])?;
    p.add(c::type_of(registry, "ProteinReference")?, &["PR"])?;
    Ok(p)
}
