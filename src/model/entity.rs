//! Species and reaction records of an imported model

use serde::{Deserialize, Deserializer, Serialize};

/// A species (metabolite) of the imported model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub compartment: Option<String>,
    /// Raw `boundaryCondition` attribute, kept as text until [`Species::is_boundary`].
    #[serde(default, deserialize_with = "flag_as_text")]
    pub boundary_condition: Option<String>,
    /// Embedded cross-reference annotations (MIRIAM URIs).
    #[serde(default)]
    pub annotations: Vec<String>,
}

impl Species {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_compartment(mut self, compartment: impl Into<String>) -> Self {
        self.compartment = Some(compartment.into());
        self
    }

    pub fn with_boundary(mut self, boundary: bool) -> Self {
        self.boundary_condition = Some(boundary.to_string());
        self
    }

    pub fn with_annotation(mut self, uri: impl Into<String>) -> Self {
        self.annotations.push(uri.into());
        self
    }

    /// Parse the boundary flag. A missing attribute means not boundary.
    pub fn is_boundary(&self) -> Result<bool, String> {
        match self.boundary_condition.as_deref().map(str::trim) {
            None => Ok(false),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" | "" => Ok(false),
                _ => Err(format!("invalid boundaryCondition '{}' on species {}", raw, self.id)),
            },
        }
    }
}

/// One participant of a reaction side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reagent {
    /// Referenced species id; absent on malformed records.
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default = "default_stoichiometry")]
    pub stoichiometry: f64,
}

impl Reagent {
    pub fn new(species: impl Into<String>, stoichiometry: f64) -> Self {
        Self {
            species: Some(species.into()),
            stoichiometry,
        }
    }
}

fn default_stoichiometry() -> f64 {
    1.0
}

/// A reaction of the imported model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub reactants: Vec<Reagent>,
    #[serde(default)]
    pub products: Vec<Reagent>,
}

impl Reaction {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_reactant(mut self, species: impl Into<String>, stoichiometry: f64) -> Self {
        self.reactants.push(Reagent::new(species, stoichiometry));
        self
    }

    pub fn with_product(mut self, species: impl Into<String>, stoichiometry: f64) -> Self {
        self.products.push(Reagent::new(species, stoichiometry));
        self
    }

    /// Signed stoichiometry: reactants negative, products positive.
    ///
    /// Fails on the first reagent lacking a species reference.
    pub fn signed_stoichiometry(&self) -> Result<Vec<(&str, f64)>, String> {
        let reactants = self.reactants.iter().map(|r| (r, -1.0));
        let products = self.products.iter().map(|r| (r, 1.0));
        reactants
            .chain(products)
            .map(|(reagent, sign)| match reagent.species.as_deref() {
                Some(s) if !s.trim().is_empty() => Ok((s, sign * reagent.stoichiometry)),
                _ => Err(format!("reaction {} has a reagent without species", self.id)),
            })
            .collect()
    }
}

/// An already-parsed model: the species and reactions handed to a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSnapshot {
    pub species: Vec<Species>,
    pub reactions: Vec<Reaction>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Text(String),
}

fn flag_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawFlag>::deserialize(deserializer)?.map(|flag| match flag {
        RawFlag::Bool(b) => b.to_string(),
        RawFlag::Text(s) => s,
    }))
}
