// World dimensions. Everything in the scene is laid out in these units and
// scaled onto the terminal at draw time.
pub const WORLD_WIDTH: f32 = 1200.0;
pub const WORLD_HEIGHT: f32 = 800.0;

pub const FPS: u32 = 60;

// Firework colours
pub const PALETTE: [(u8, u8, u8); 8] = [
    (255, 0, 0),     // Red
    (255, 165, 0),   // Orange
    (255, 255, 0),   // Yellow
    (0, 255, 0),     // Green
    (0, 191, 255),   // Deep sky blue
    (138, 43, 226),  // Blue violet
    (255, 20, 147),  // Deep pink
    (255, 215, 0),   // Gold
];

pub const WHITE: (u8, u8, u8) = (255, 255, 255);
pub const GOLD: (u8, u8, u8) = (255, 215, 0);
pub const HOT_PINK: (u8, u8, u8) = (255, 105, 180);
pub const INSTRUCTION_GREY: (u8, u8, u8) = (200, 200, 200);

// Particles
pub const PARTICLE_LIFETIME: i32 = 255;
pub const PARTICLE_DECAY: i32 = 3;
pub const PARTICLE_GRAVITY: f32 = 0.15;
pub const PARTICLE_SPEED: (f32, f32) = (1.0, 8.0);
pub const PARTICLE_SIZE: (i32, i32) = (2, 5);

// Rockets
pub const APEX_RANGE: (i32, i32) = (150, 400);
pub const LAUNCH_SPEED: (f32, f32) = (8.0, 12.0);
pub const ASCENT_DRAG: f32 = 0.3;
pub const ROCKET_RADIUS: f32 = 4.0;
pub const BURST_SIZE: (i32, i32) = (50, 100);

// Field
pub const SPAWN_INTERVAL: u32 = 15;
pub const LAUNCH_INSET: f32 = 100.0;

// Popup
pub const POPUP_EVERY: u64 = 15;
pub const POPUP_LIFETIME: i32 = 180;
pub const POPUP_FADE_TICKS: i32 = 30;
pub const POPUP_SIZE: (i32, i32) = (200, 400);
pub const POPUP_INSET: i32 = 100;

// Decorations
pub const STAR_COUNT: usize = 100;
pub const DECOR_SEED: u64 = 42;
pub const CAKE_POSITIONS: [(f32, f32); 2] = [(300.0, 650.0), (900.0, 650.0)];
pub const CAKE_SCALE: f32 = 1.2;

pub const TITLE: &str = "Happy 22nd Birthday!";
pub const NAME: &str = "RUBI";
pub const INSTRUCTIONS: [&str; 4] = [
    "Click anywhere to launch fireworks!",
    "Press SPACE for random firework",
    "Press M to pause/play music",
    "Press Q or ESC to exit",
];

pub const MUSIC_EXTENSIONS: [&str; 3] = ["mp3", "wav", "ogg"];
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub const LOG_FILE_NAME: &str = "birthday-fireworks.log";
pub const LOG_ENV_VAR: &str = "FIREWORKS_LOG";
