pub mod backend_gateway;
pub mod clock;
pub mod notification_sink;
pub mod view_surface;
