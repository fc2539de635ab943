pub mod ids;
pub mod user;
pub mod circle;
pub mod membership;
pub mod trip;
pub mod nudge;
pub mod aggregate;

// Re-exports for convenience
pub use ids::Id;
pub use user::User;
pub use circle::Circle;
pub use membership::{Membership, MembershipRole};
pub use trip::{PendingAction, Trip, TripStatus};
pub use nudge::{Nudge, NudgeDelivery};
pub use aggregate::DailyAggregate;
