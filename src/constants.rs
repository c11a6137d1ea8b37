// Browser-side frame pacing constants.

// Longest frame step fed to the simulation; tab switches can stall rAF for seconds.
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Instance rows are handed to JS as flat f32 arrays.
pub const FLOATS_PER_INSTANCE: usize = 12;
