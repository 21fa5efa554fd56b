/**
 * Determining the winner and fair share of a single room.
 */
mod resolve;
pub use resolve::*;

/**
 * Scaling the fair shares so that the rooms add up to the rent.
 */
mod reconcile;
pub use reconcile::*;

/**
 * Rounding the results for presentation.
 */
mod report;
pub use report::*;

/**
 * The auction itself, which sequences everything above.
 */
mod auction;
pub use auction::*;
