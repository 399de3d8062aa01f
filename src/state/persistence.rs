use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{FoodCatalog, FoodRecord, RequirementProfile};
use crate::state::RestrictionSet;

/// Load a catalog from a JSON array of food records.
///
/// Duplicate keys and invalid records are rejected, not merged.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<FoodCatalog> {
    let content = fs::read_to_string(path)?;
    let foods: Vec<FoodRecord> = serde_json::from_str(&content)?;
    FoodCatalog::new(foods)
}

/// Load a requirement profile; missing fields take default targets.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<RequirementProfile> {
    let content = fs::read_to_string(path)?;
    let profile: RequirementProfile = serde_json::from_str(&content)?;
    profile.validate()?;
    Ok(profile)
}

/// Load the session's restriction set. A missing file is an empty set.
pub fn load_restrictions<P: AsRef<Path>>(path: P) -> Result<RestrictionSet> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(RestrictionSet::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save the restriction set as a JSON array of keys.
pub fn save_restrictions<P: AsRef<Path>>(path: P, restrictions: &RestrictionSet) -> Result<()> {
    let json = serde_json::to_string_pretty(restrictions)?;
    fs::write(path, json)?;
    Ok(())
}
