pub mod audio;
pub mod constants;
pub mod effects;
pub mod error;
pub mod frame_stats;
pub mod leaderboard;
pub mod math;
pub mod noise;
pub mod particles;
pub mod runtime;
pub mod settings;

pub use audio::*;
pub use effects::*;
pub use error::*;
pub use frame_stats::*;
pub use leaderboard::*;
pub use math::*;
pub use noise::*;
pub use particles::*;
pub use runtime::*;
pub use settings::*;
