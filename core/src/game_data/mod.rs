//! Static and patch-refreshed game data: spell cooldowns, item haste, and
//! spell name classification.

mod abilities;
mod items;
mod spell_resolver;

pub use abilities::{AbilityCatalog, DEFAULT_COOLDOWN_SECS};
pub use items::{ItemHasteTable, cooldown_after_haste};
pub use spell_resolver::resolve_spell;
