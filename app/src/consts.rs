/// Element the application is rendered into.
pub const MOUNT_POINT: &str = "#app";

/// Name the bus icon is registered under.
pub const BUS_ICON: &str = "bus-icon";

pub const DEFAULT_BUS_COLOR: &str = "#0b6ae0";

pub const SENTRY_DSN: &str =
    "https://d26eb17a90ee4de8a19e666ebb7a39a1@o422150.ingest.sentry.io/5345475";
