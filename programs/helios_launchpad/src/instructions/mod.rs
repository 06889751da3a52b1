// programs/helios_launchpad/src/instructions/mod.rs

pub mod assets;
pub mod campaign;
pub mod claim;
pub mod initialize;
pub mod invest;
pub mod refund;
pub mod verification;
pub mod views;
pub mod withdraw;

pub use assets::*;
pub use campaign::*;
pub use claim::*;
pub use initialize::*;
pub use invest::*;
pub use refund::*;
pub use verification::*;
pub use views::*;
pub use withdraw::*;
