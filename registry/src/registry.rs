//! The Registry - immutable schema lookup.

use crate::{PropertyDef, PropertyRef, SubpropertyIndex, SubtypeIndex, TypeDef};
use pax_core::{PropertyId, TypeId};
use std::collections::HashMap;

/// The Registry provides runtime lookup of ontology definitions.
/// It is immutable after construction.
#[derive(Debug, Default)]
pub struct Registry {
    /// Class definitions by ID.
    types: HashMap<TypeId, TypeDef>,
    /// Class ID lookup by name.
    type_names: HashMap<String, TypeId>,

    /// Property definitions by ID.
    properties: HashMap<PropertyId, PropertyDef>,
    /// Forward and inverse property names.
    property_names: HashMap<String, PropertyRef>,

    /// Precomputed subclass relationships.
    subtype_index: SubtypeIndex,
    /// Precomputed sub-property relationships.
    subproperty_index: SubpropertyIndex,
}

impl Registry {
    pub(crate) fn new(
        types: HashMap<TypeId, TypeDef>,
        type_names: HashMap<String, TypeId>,
        properties: HashMap<PropertyId, PropertyDef>,
        property_names: HashMap<String, PropertyRef>,
        subtype_index: SubtypeIndex,
        subproperty_index: SubpropertyIndex,
    ) -> Self {
        Self {
            types,
            type_names,
            properties,
            property_names,
            subtype_index,
            subproperty_index,
        }
    }

    // ==================== Type Lookups ====================

    /// Get a class definition by name.
    pub fn get_type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.type_names.get(name).and_then(|id| self.types.get(id))
    }

    /// Get a class definition by ID.
    pub fn get_type(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(&id)
    }

    /// Get a class ID by name.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Get the name of a class, or `"?"` for an unknown ID.
    pub fn type_name(&self, id: TypeId) -> &str {
        self.types.get(&id).map(|t| t.name.as_str()).unwrap_or("?")
    }

    /// Get all class definitions.
    pub fn all_types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// Get the number of classes.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ==================== Subtype Queries ====================

    /// Check if `sub` is `super_type` or one of its subclasses.
    pub fn is_subtype(&self, sub: TypeId, super_type: TypeId) -> bool {
        self.subtype_index.is_descendant(sub, super_type)
    }

    /// Get all subclasses of a class (not including the class itself).
    pub fn get_subtypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtype_index.descendants(type_id)
    }

    /// Get all superclasses of a class (not including the class itself).
    pub fn get_supertypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtype_index.ancestors(type_id)
    }

    // ==================== Property Lookups ====================

    /// Get a property definition by ID.
    pub fn get_property(&self, id: PropertyId) -> Option<&PropertyDef> {
        self.properties.get(&id)
    }

    /// Resolve a forward or inverse property name.
    pub fn resolve_property(&self, name: &str) -> Option<PropertyRef> {
        self.property_names.get(name).copied()
    }

    /// The name a property is walked under in the given direction.
    pub fn property_name(&self, prop: PropertyRef) -> Option<&str> {
        let def = self.properties.get(&prop.id)?;
        if prop.inverse {
            def.inverse_name.as_deref()
        } else {
            Some(def.name.as_str())
        }
    }

    /// The class of the nodes a walk starts from.
    pub fn source_type(&self, prop: PropertyRef) -> Option<TypeId> {
        let def = self.properties.get(&prop.id)?;
        Some(if prop.inverse { def.range } else { def.domain })
    }

    /// The class of the nodes a walk ends at.
    pub fn target_type(&self, prop: PropertyRef) -> Option<TypeId> {
        let def = self.properties.get(&prop.id)?;
        Some(if prop.inverse { def.domain } else { def.range })
    }

    /// The property itself followed by all of its sub-properties.
    pub fn expand_property(&self, id: PropertyId) -> impl Iterator<Item = PropertyId> + '_ {
        std::iter::once(id).chain(self.subproperty_index.descendants(id))
    }

    /// Get all property definitions.
    pub fn all_properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties.values()
    }
}
