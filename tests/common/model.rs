//! Model species and reactions

use metlink::{Reaction, Species};

/// Species of the fragment. `M_glc__D_b` is the boundary copy of
/// extracellular glucose.
pub fn species() -> Vec<Species> {
    vec![
        Species::new("M_glc__D_c").with_name("D-Glucose").with_compartment("c"),
        Species::new("M_glc__D_e").with_name("D-Glucose").with_compartment("e"),
        Species::new("M_glc__D_b")
            .with_name("D-Glucose")
            .with_compartment("e")
            .with_boundary(true),
        Species::new("M_g6p_c")
            .with_name("D-Glucose-6-phosphate")
            .with_compartment("c"),
        Species::new("M_atp_c")
            .with_name("ATP")
            .with_compartment("c")
            .with_annotation("http://identifiers.org/seed.compound/cpd00002"),
        Species::new("M_adp_c").with_name("ADP").with_compartment("c"),
        Species::new("M_glcn_c").with_compartment("c"),
    ]
}

pub fn hexokinase() -> Reaction {
    Reaction::new("R_HEX1")
        .with_reactant("M_glc__D_c", 1.0)
        .with_reactant("M_atp_c", 1.0)
        .with_product("M_g6p_c", 1.0)
        .with_product("M_adp_c", 1.0)
}

/// Hexokinase drawn on extracellular glucose: same chemistry, other compartment.
pub fn hexokinase_extracellular() -> Reaction {
    Reaction::new("R_HEX1_e")
        .with_reactant("M_glc__D_e", 1.0)
        .with_reactant("M_atp_c", 1.0)
        .with_product("M_g6p_c", 1.0)
        .with_product("M_adp_c", 1.0)
}
