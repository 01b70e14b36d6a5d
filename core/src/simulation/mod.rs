pub mod clock;
pub mod driver;
pub mod orbit;
pub mod timer;

pub use clock::{zulu_time, DisplayClock};
pub use driver::SimulationDriver;
pub use orbit::{OrbitConfig, OrbitFix, OrbitPlan, OrbitProfile, OrbitState};
pub use timer::PeriodicTask;
