pub mod player_update;
pub mod session;
pub mod state;
pub mod tick;

pub use session::Session;
pub use state::GameState;
pub use tick::{run_simulation_tick, SimulationEvent};
