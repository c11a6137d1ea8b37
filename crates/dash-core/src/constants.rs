// Shared gameplay/audio/visual tuning constants used by both web and native frontends.

// Collision
pub const DEFAULT_COLLISION_THRESHOLD: f32 = 0.8; // world units between centers

// Noise
pub const NOISE_COEFF_X: f64 = 12.9898;
pub const NOISE_COEFF_Y: f64 = 78.233;
pub const NOISE_COEFF_Z: f64 = 45.164;
pub const NOISE_SCALE: f64 = 43758.5453;
pub const PERLIN_OCTAVES: u32 = 4;
pub const PERLIN_PERSISTENCE: f64 = 0.5;

// Audio
pub const DEFAULT_MASTER_VOLUME: f32 = 0.3;
pub const ENVELOPE_FLOOR_GAIN: f32 = 0.01; // exponential ramps cannot reach zero
pub const FILTER_CUTOFF_RATIO: f32 = 2.0; // low-pass cutoff relative to tone frequency
pub const AMBIENT_LOOP_SECONDS: f32 = 2.0;
pub const AMBIENT_AMPLITUDE: f32 = 0.1;

// Particles
pub const DEFAULT_MAX_PARTICLES: usize = 500;
pub const PARTICLE_GRAVITY: f32 = 0.5; // applied to leaf and dust only
pub const PARTICLE_SPIN_MAX: f32 = 2.0; // rad/s, symmetric around zero

pub const COLOR_GOLD: [f32; 3] = [1.0, 0.843, 0.0]; // #ffd700
pub const COLOR_BROWN: [f32; 3] = [0.545, 0.271, 0.075]; // #8b4513
pub const COLOR_WHITE: [f32; 3] = [1.0, 1.0, 1.0];

// Visual effects
pub const SHAKE_REFERENCE_SEC: f32 = 0.5; // shake magnitude is normalized to this duration
pub const NEUTRAL_TIME_SCALE: f32 = 1.0;
pub const NEUTRAL_BLOOM: f32 = 1.0;

// Event-driven effect presets
pub const JUMP_DUST_COUNT: usize = 5;
pub const COLLECT_SPARKLE_COUNT: usize = 10;
pub const COLLISION_LEAF_COUNT: usize = 5;
pub const COLLISION_SHAKE_INTENSITY: f32 = 0.3;
pub const COLLISION_SHAKE_SEC: f32 = 0.5;
pub const COLLISION_SLOWMO_FACTOR: f32 = 0.5;
pub const COLLISION_SLOWMO_MS: u32 = 300;
pub const COMBO_BLOOM_INTENSITY: f32 = 1.5;
pub const COMBO_BLOOM_MS: u32 = 500;
pub const COMBO_SPARKLES_PER_LEVEL: usize = 5;

// Frame stats
pub const FPS_SAMPLE_WINDOW_MS: f64 = 1000.0;
pub const QUALITY_LOW_BELOW_FPS: u32 = 30;
pub const QUALITY_MEDIUM_BELOW_FPS: u32 = 45;

// Persistence
pub const SETTINGS_KEY: &str = "squirrelDashSettings";

// Leaderboard
pub const LEADERBOARD_CAPACITY: usize = 20;
pub const LEADERBOARD_TOP: usize = 10;
pub const GAMES_PER_PLAYER_ESTIMATE: u64 = 15;
pub const POINTS_PER_ACORN: u64 = 150;
pub const POINTS_PER_METER: u64 = 10;
