//! Schedule resolution: bulk preloading, per-day resolution, normalization
//! and weekly exclusion selection.

mod exclusion;
mod normalize;
mod preload;
mod resolver;

pub use exclusion::effective_exclusion;
pub use normalize::{Normalized, ScheduleKind, default_fixed, normalize};
pub use preload::{PRELOAD_CHUNK_SIZE, SchedulePreload};
pub use resolver::{ResolvedSchedule, resolve_schedule};
