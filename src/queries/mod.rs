pub mod membership_queries;
pub mod trip_queries;
pub mod stats_queries;
