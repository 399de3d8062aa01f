mod persistence;
mod restrictions;

pub use persistence::{load_catalog, load_profile, load_restrictions, save_restrictions};
pub use restrictions::RestrictionSet;
