//! Physics constant lookup tool
//!
//! A fixed table of physical constants keyed by snake_case name, and an
//! extractor that finds a constant mentioned in free text.

use crate::number::Number;
use crate::tools::AiTool;
use anyhow::{Error, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

/// Text shown when a name is not in the table
pub const CONSTANT_NOT_FOUND: &str = "Constant not found.";

/// Canonical name to value, in SI units
pub static PHYSICS_CONSTANTS: LazyLock<Vec<(&'static str, Number)>> = LazyLock::new(|| {
    vec![
        ("speed_of_light", Number::from(299792458)),             // m/s
        ("planck_constant", Number::Float(6.62607015e-34)),      // J*s
        ("gravitational_constant", Number::Float(6.67430e-11)),  // m^3 kg^-1 s^-2
        ("elementary_charge", Number::Float(1.602176634e-19)),   // C
        ("avogadro_number", Number::Float(6.02214076e23)),       // mol^-1
        ("boltzmann_constant", Number::Float(1.380649e-23)),     // J/K
        ("gas_constant", Number::Float(8.314462618)),            // J/(mol*K)
        ("electron_mass", Number::Float(9.10938356e-31)),        // kg
        ("proton_mass", Number::Float(1.67262192369e-27)),       // kg
    ]
});

/// Recognized spellings, checked in order
pub const CONSTANT_ALIASES: &[&str] = &[
    "speed of light",
    "speed_of_light",
    "planck constant",
    "planck_constant",
    "gravitational constant",
    "gravitational_constant",
    "elementary charge",
    "elementary_charge",
    "avogadro number",
    "avogadro_number",
    "boltzmann constant",
    "boltzmann_constant",
    "gas constant",
    "gas_constant",
    "electron mass",
    "electron_mass",
    "proton mass",
    "proton_mass",
];

/// Look up a constant by its canonical name
pub fn get_constant(name: &str) -> Option<Number> {
    PHYSICS_CONSTANTS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.clone())
}

/// Find the canonical name of a constant mentioned anywhere in `query`.
///
/// Matching is case-insensitive and treats hyphens as spaces, so
/// "Speed-Of-Light" resolves to `speed_of_light`. The first alias in
/// [`CONSTANT_ALIASES`] order wins.
pub fn extract_constant_name(query: &str) -> Option<String> {
    let normalized = query.to_lowercase().replace('-', " ");

    if let Some(alias) = CONSTANT_ALIASES.iter().find(|alias| normalized.contains(*alias)) {
        return Some(alias.replace(' ', "_"));
    }

    CONSTANT_ALIASES
        .iter()
        .find(|alias| normalized.contains(&alias.replace('_', " ")))
        .map(|alias| alias.replace(' ', "_"))
}

/// A tool that returns the value of a physical constant
pub struct PhysicsConstantTool;

#[async_trait]
impl AiTool for PhysicsConstantTool {
    fn name(&self) -> &str {
        "physics_constant"
    }

    fn description(&self) -> &str {
        "Returns the SI value of a physical constant such as the speed of light or the electron mass"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name of the constant, e.g. \"planck_constant\" or \"Planck constant\""
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, params: Value) -> Result<Value, Error> {
        self.validate_params(&params)?;

        let requested = params["name"]
            .as_str()
            .ok_or_else(|| anyhow!("Missing 'name' parameter"))?;

        let canonical = if get_constant(requested).is_some() {
            requested.to_string()
        } else {
            extract_constant_name(requested).ok_or_else(|| anyhow!(CONSTANT_NOT_FOUND))?
        };
        let value = get_constant(&canonical).ok_or_else(|| anyhow!(CONSTANT_NOT_FOUND))?;
        debug!("Resolved constant '{}' to {} = {}", requested, canonical, value);

        Ok(serde_json::json!({
            "name": canonical,
            "value": value,
        }))
    }

    fn validate_params(&self, params: &Value) -> Result<(), Error> {
        if !params.get("name").is_some_and(|v| v.is_string()) {
            return Err(anyhow!("Missing or invalid 'name' parameter"));
        }
        Ok(())
    }
}
