//! Frequently used constraints.
//!
//! Stateless factories; each call builds a fresh, immutable constraint.

use crate::constraint::{
    shared, Chain, ConstraintRef, DifferentialActivity, Equality, LinkDirection, LinkedPe,
    NotUbique, ParticipatesInConv, PathConstraint, RelType, SelfOrThis, TypeCheck,
};
use crate::error::PatternResult;
use pax_registry::Registry;
use std::collections::HashSet;

fn path(registry: &Registry, text: &str) -> PatternResult<ConstraintRef> {
    Ok(shared(PathConstraint::parse(registry, text)?))
}

/// From an entity reference to the physical entities using it.
pub fn er_to_pe(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "EntityReference/entityReferenceOf")
}

/// From a simple physical entity to its entity reference.
pub fn pe_to_er(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "SimplePhysicalEntity/entityReference")
}

/// From a physical entity up to itself, its complexes and generic parents.
pub fn link_to_complex(registry: &Registry) -> PatternResult<ConstraintRef> {
    Ok(shared(LinkedPe::new(registry, LinkDirection::Up)?))
}

/// From a physical entity down to itself, its components and generic members.
pub fn link_to_simple(registry: &Registry) -> PatternResult<ConstraintRef> {
    Ok(shared(LinkedPe::new(registry, LinkDirection::Down)?))
}

pub fn pe_to_control(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "PhysicalEntity/controllerOf")
}

/// From a control to the conversions it controls, possibly through other controls.
pub fn control_to_conv(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "Control/controlled*:Conversion")
}

pub fn control_to_temp_reac(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "Control/controlled*:TemplateReaction")
}

/// From a control to every interaction below it, the control excluded.
pub fn control_to_inter(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "Control/controlled/controlled*")
}

pub fn controller_pe(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "Control/controller:PhysicalEntity")
}

pub fn pe_to_inter(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "PhysicalEntity/participantOf")
}

/// Physical entities taking part in an interaction in any role.
pub fn participant(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "Interaction/participant:PhysicalEntity")
}

/// Entity references of an interaction's participants and their members.
pub fn participant_er(registry: &Registry) -> PatternResult<ConstraintRef> {
    Ok(shared(Chain::new(vec![
        participant(registry)?,
        link_to_simple(registry)?,
        pe_to_er(registry)?,
    ])?))
}

/// Entity references of a physical entity and of its members.
pub fn comp_to_er(registry: &Registry) -> PatternResult<ConstraintRef> {
    Ok(shared(Chain::new(vec![
        link_to_simple(registry)?,
        pe_to_er(registry)?,
    ])?))
}

pub fn left(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "Conversion/left")
}

pub fn right(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "Conversion/right")
}

pub fn product(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "TemplateReaction/product")
}

/// Conversions a physical entity participates in, on either side.
pub fn participates_in_conv(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "PhysicalEntity/participantOf:Conversion")
}

/// Conversions where the entity is consumed, read through their direction.
pub fn consumed_by_conv(registry: &Registry) -> PatternResult<ConstraintRef> {
    Ok(shared(ParticipatesInConv::new(registry, RelType::Input, true)?))
}

pub fn molecular_interaction(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "PhysicalEntity/participantOf:MolecularInteraction")
}

/// Complexes containing a physical entity, at any depth.
pub fn complexes(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "PhysicalEntity/componentOf*")
}

pub fn with_complexes(registry: &Registry) -> PatternResult<ConstraintRef> {
    Ok(shared(SelfOrThis::new(complexes(registry)?)?))
}

/// Components of a complex, at any depth.
pub fn complex_members(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "Complex/component*")
}

pub fn simple_members(registry: &Registry) -> PatternResult<ConstraintRef> {
    path(registry, "Complex/component*:SimplePhysicalEntity")
}

pub fn with_simple_members(registry: &Registry) -> PatternResult<ConstraintRef> {
    Ok(shared(SelfOrThis::new(simple_members(registry)?)?))
}

/// Physical entities equivalent through generic membership, in either direction.
pub fn generic_equiv(registry: &Registry) -> PatternResult<ConstraintRef> {
    let either = PathConstraint::any_of(
        registry,
        &[
            "PhysicalEntity/memberPhysicalEntity*",
            "PhysicalEntity/memberPhysicalEntityOf*",
        ],
    )?;
    Ok(shared(SelfOrThis::new(shared(either))?))
}

pub fn equal(equal: bool) -> ConstraintRef {
    shared(Equality::new(equal))
}

pub fn type_of(registry: &Registry, type_name: &str) -> PatternResult<ConstraintRef> {
    Ok(shared(TypeCheck::named(registry, type_name)?))
}

pub fn not_ubique(registry: &Registry, uris: HashSet<String>) -> PatternResult<ConstraintRef> {
    Ok(shared(NotUbique::new(registry, uris)?))
}

pub fn differential_activity(registry: &Registry, activating: bool) -> PatternResult<ConstraintRef> {
    Ok(shared(DifferentialActivity::new(registry, activating)?))
}
