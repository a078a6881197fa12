// SMP-toolbox row converter for Immersive Vehicles definition fragments.
//
// Takes the pipe-delimited rows the toolbox export puts on the clipboard and
// builds the hitbox, part, or animation section of a vehicle definition from
// them. The three modes share the row plumbing, the `{N}` order-marker naming
// convention, and the declared-order sort.

pub mod animation;
pub mod error;
pub mod hitbox;
pub mod names;
pub mod parts;
pub mod rows;

pub use animation::{Animation, AnimationEntry, animation_entries};
pub use error::{ConvertError, Result};
pub use hitbox::{Collision, CollisionGroup, collision_groups};
pub use parts::{Part, parts};
