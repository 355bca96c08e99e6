//! Runtime routing configuration.

pub mod routing;

pub use routing::{BackendWithLevel, DEFAULT_ROUTE_ID, PathLevel, Route, RoutingError, RoutingTable};
