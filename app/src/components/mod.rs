pub mod bus_icon;

pub use self::bus_icon::BusIcon;
