// In-place transforms over vehicle definition JSON. Each patcher takes an
// already-parsed document, mutates it when the fix applies, and reports
// whether anything changed; file handling stays with the caller.

pub mod bodyroll;
pub mod damage;
pub mod tow;
pub mod upholstery;

pub use tow::TowOutcome;

#[cfg(test)]
mod tests;
