// Default tuning values for the ship. `FlightConfig::default()` is built from
// these; a JSON config file overrides any of them.

// Frame pacing
pub const REFERENCE_FRAME_RATE: f32 = 60.0; // frames/sec the per-frame constants were tuned at

// Roll (spring oscillator on Z)
pub const ROLL_STIFFNESS: f32 = 50.0;
pub const ROLL_DAMPING: f32 = 4.0;
pub const ROLL_MAX_ANGLE_DEG: f32 = 15.0;

// Pitch (spring oscillator on X)
pub const PITCH_STIFFNESS: f32 = 60.0;
pub const PITCH_DAMPING: f32 = 6.0;
pub const PITCH_MAX_ANGLE_DEG: f32 = 10.0;

// Yaw (rate rotator on Y)
pub const YAW_ACCELERATION: f32 = 4.0; // rad/s^2
pub const YAW_MAX_SPEED: f32 = 3.0; // rad/s
pub const YAW_DECAY_FACTOR: f32 = 0.95; // per update call
pub const YAW_RATE_INCREMENT: f32 = 0.1; // rad/s per reference frame
pub const YAW_MAX_RATE: f32 = 3.0; // rad/s

// Throttle (planar translator)
pub const THROTTLE_ACCELERATION: f32 = 0.5; // units/frame per second
pub const THROTTLE_MAX_SPEED: f32 = 0.4; // units/frame
pub const THROTTLE_DECAY_FACTOR: f32 = 0.95; // fraction lost per second

// Snap thresholds
pub const RATE_REST_THRESHOLD: f32 = 0.01; // |rate| below this snaps to 0
pub const VELOCITY_REST_THRESHOLD: f32 = 0.001; // per-axis planar velocity snap

// Spring integrator
pub const SPRING_MASS: f32 = 1.0;
pub const SPRING_STEP_SEC: f32 = 1.0 / 240.0; // fixed integration step
pub const SPRING_MAX_STEPS_PER_FRAME: u32 = 64; // cap after long stalls
pub const SPRING_REST_DISPLACEMENT: f32 = 0.001;
pub const SPRING_REST_VELOCITY: f32 = 0.001;

// Exhaust
pub const EXHAUST_PARTICLE_COUNT: usize = 200;
pub const EXHAUST_CONE_ANGLE_DEG: f32 = 30.0; // emission half-angle
pub const EXHAUST_DECAY_SPEED: f32 = 0.01; // lifetime lost per frame
pub const EXHAUST_SPEED_DECAY: f32 = 0.98; // velocity multiplier per frame
pub const EXHAUST_EMISSION_SPEED: f32 = 0.2; // units/frame at spawn
pub const LIFETIME_SNAP_FRACTION: f32 = 1.0e-3; // remainders below decay_speed * this count as dead
pub const EXHAUST_LEFT_OFFSET: [f32; 3] = [0.5, 0.75, -0.5];
pub const EXHAUST_RIGHT_OFFSET: [f32; 3] = [-0.5, 0.75, -0.5];

// Exhaust colour ramp, highest lifetime limit first
pub const EXHAUST_COLOR_MAP: [(f32, [f32; 3]); 3] = [
    (1.0, [0.0, 0.0, 1.0]), // blue
    (0.9, [1.0, 0.0, 0.0]), // red
    (0.5, [1.0, 1.0, 0.0]), // yellow
];

// Default key bindings
pub const KEY_ROLL_POSITIVE: &str = "e";
pub const KEY_ROLL_NEGATIVE: &str = "q";
pub const KEY_PITCH_POSITIVE: &str = "ArrowUp";
pub const KEY_PITCH_NEGATIVE: &str = "ArrowDown";
pub const KEY_YAW_POSITIVE: &str = "a";
pub const KEY_YAW_NEGATIVE: &str = "d";
pub const KEY_THROTTLE_POSITIVE: &str = "w";
pub const KEY_THROTTLE_NEGATIVE: &str = "s";
pub const KEY_EXHAUST: &str = " ";
