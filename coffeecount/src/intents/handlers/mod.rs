mod builtin;
mod count_coffee;
mod make_coffee;
mod perform_maintenance;

pub use builtin::*;
pub use count_coffee::CountCoffeeHandler;
pub use make_coffee::MakeCoffeeHandler;
pub use perform_maintenance::PerformMaintenanceHandler;
