pub mod authority;
pub mod derivatives;
pub mod moments;

pub use authority::AuthorityEstimator;
pub use derivatives::{angle_of_attack, AxisSample, DerivativeEstimator};
pub use moments::{MomentAggregator, MomentState, PassKind, TickFrame};
