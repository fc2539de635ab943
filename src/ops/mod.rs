pub mod user_ops;
pub mod circle_ops;
pub mod trip_ops;
pub mod nudge_ops;
pub mod aggregation_ops;
