//! Built-in behaviors with persistent effects.

mod damage_buff;
mod growth;
mod invincibility;

pub use damage_buff::DamageMultiplier;
pub use growth::GrowthBuff;
pub use invincibility::TimedInvincibility;
