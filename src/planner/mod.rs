pub mod checker;
pub mod constants;
pub mod fallback;
pub mod regenerate;
pub mod search;
pub mod totals;

pub use checker::{check, Direction, Subject, Verdict, Violation};
pub use constants::*;
pub use fallback::{search_or_fallback, Outcome};
pub use regenerate::{
    regenerate, regenerate_seeded, RegenerateConfig, Revision, Substitution, SubstitutionPolicy,
};
pub use search::{search, search_excluding, search_seeded, SearchConfig};
pub use totals::aggregate;
