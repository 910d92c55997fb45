//! The pathway ontology subset the pattern library is written against.

use crate::{Registry, RegistryBuilder, RegistryError};

/// Attribute names and controlled-vocabulary terms.
pub mod vocab {
    pub const DISPLAY_NAME: &str = "displayName";
    pub const CONVERSION_DIRECTION: &str = "conversionDirection";
    pub const CATALYSIS_DIRECTION: &str = "catalysisDirection";
    pub const CONTROL_TYPE: &str = "controlType";
    pub const MODIFICATION_TYPE: &str = "modificationType";

    pub const LEFT_TO_RIGHT: &str = "LEFT_TO_RIGHT";
    pub const RIGHT_TO_LEFT: &str = "RIGHT_TO_LEFT";
    pub const REVERSIBLE: &str = "REVERSIBLE";

    pub const ACTIVATION: &str = "ACTIVATION";
    pub const INHIBITION: &str = "INHIBITION";
}

/// Build the registry of pathway classes and properties.
pub fn biopax() -> Result<Registry, RegistryError> {
    let mut b = RegistryBuilder::new();

    b.add_type("Entity").abstract_type().done()?;

    // Physical entities
    b.add_type("PhysicalEntity").extends("Entity").done()?;
    b.add_type("SimplePhysicalEntity")
        .extends("PhysicalEntity")
        .abstract_type()
        .done()?;
    for name in ["Protein", "SmallMolecule", "Dna", "Rna"] {
        b.add_type(name).extends("SimplePhysicalEntity").done()?;
    }
    b.add_type("Complex").extends("PhysicalEntity").done()?;

    // References
    b.add_type("EntityReference").abstract_type().done()?;
    for name in [
        "ProteinReference",
        "SmallMoleculeReference",
        "DnaReference",
        "RnaReference",
    ] {
        b.add_type(name).extends("EntityReference").done()?;
    }

    // Features
    b.add_type("EntityFeature").done()?;
    b.add_type("ModificationFeature")
        .extends("EntityFeature")
        .done()?;

    // Interactions
    b.add_type("Interaction").extends("Entity").done()?;
    b.add_type("MolecularInteraction")
        .extends("Interaction")
        .done()?;
    b.add_type("Conversion").extends("Interaction").done()?;
    for name in [
        "BiochemicalReaction",
        "ComplexAssembly",
        "Transport",
        "Degradation",
    ] {
        b.add_type(name).extends("Conversion").done()?;
    }
    b.add_type("TemplateReaction").extends("Interaction").done()?;
    b.add_type("Control").extends("Interaction").done()?;
    for name in ["Catalysis", "Modulation", "TemplateReactionRegulation"] {
        b.add_type(name).extends("Control").done()?;
    }

    // Structure
    b.add_property("entityReference", "SimplePhysicalEntity", "EntityReference")
        .inverse("entityReferenceOf")
        .done()?;
    b.add_property("memberEntityReference", "EntityReference", "EntityReference")
        .inverse("memberEntityReferenceOf")
        .done()?;
    b.add_property("component", "Complex", "PhysicalEntity")
        .inverse("componentOf")
        .done()?;
    b.add_property("memberPhysicalEntity", "PhysicalEntity", "PhysicalEntity")
        .inverse("memberPhysicalEntityOf")
        .done()?;
    b.add_property("feature", "PhysicalEntity", "EntityFeature")
        .inverse("featureOf")
        .done()?;
    b.add_property("notFeature", "PhysicalEntity", "EntityFeature")
        .inverse("notFeatureOf")
        .done()?;
    b.add_property("entityFeature", "EntityReference", "EntityFeature")
        .inverse("entityFeatureOf")
        .done()?;

    // Participation
    b.add_property("participant", "Interaction", "Entity")
        .inverse("participantOf")
        .done()?;
    b.add_property("left", "Conversion", "PhysicalEntity")
        .sub_property_of("participant")
        .done()?;
    b.add_property("right", "Conversion", "PhysicalEntity")
        .sub_property_of("participant")
        .done()?;
    b.add_property("product", "TemplateReaction", "PhysicalEntity")
        .sub_property_of("participant")
        .done()?;
    b.add_property("template", "TemplateReaction", "PhysicalEntity")
        .sub_property_of("participant")
        .done()?;
    b.add_property("controller", "Control", "PhysicalEntity")
        .sub_property_of("participant")
        .inverse("controllerOf")
        .done()?;
    b.add_property("controlled", "Control", "Interaction")
        .sub_property_of("participant")
        .inverse("controlledOf")
        .done()?;

    b.build()
}
