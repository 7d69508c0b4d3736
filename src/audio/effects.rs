//! Sound effect catalog
//!
//! Each effect is a fixed, compile-time list of tones and silences.
//! Adding an effect means adding a variant and its table here, nothing
//! else in the crate branches on the variant.

use super::tone::ToneRequest;

/// One element of an effect sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Tone(ToneRequest),
    /// Blocking pause, no samples streamed
    Silence { duration_ms: u32 },
}

impl Step {
    /// Wall-clock length of this step
    #[inline]
    pub fn duration_ms(&self) -> u32 {
        match self {
            Step::Tone(t) => t.duration_ms,
            Step::Silence { duration_ms } => *duration_ms,
        }
    }
}

const fn tone(frequency_hz: u32, duration_ms: u32) -> Step {
    Step::Tone(ToneRequest::new(frequency_hz, duration_ms))
}

const fn silence(duration_ms: u32) -> Step {
    Step::Silence { duration_ms }
}

/// Named game/UI sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Generic beep
    Beep,
    /// Menu selection
    Select,
    /// Back/cancel
    Back,
    /// Error/invalid
    Error,
    /// Collect item/score
    Coin,
    /// Jump/move up
    Jump,
    /// Fire/shoot
    Shoot,
    /// Explosion/destroy
    Explode,
    GameOver,
    /// Level up/win
    LevelUp,
    /// Alternating high-low alarm
    Alarm,
    /// Gentle notification
    Notification,
}

static BEEP: [Step; 1] = [tone(800, 50)];

static SELECT: [Step; 3] = [tone(1200, 50), silence(20), tone(1500, 50)];

static BACK: [Step; 3] = [tone(1000, 50), silence(20), tone(600, 50)];

static ERROR: [Step; 1] = [tone(200, 150)];

static COIN: [Step; 5] = [
    tone(1000, 50),
    silence(20),
    tone(1500, 50),
    silence(20),
    tone(2000, 100),
];

// 400 Hz upward in 50 Hz steps, below 800
static JUMP: [Step; 8] = [
    tone(400, 10),
    tone(450, 10),
    tone(500, 10),
    tone(550, 10),
    tone(600, 10),
    tone(650, 10),
    tone(700, 10),
    tone(750, 10),
];

// 1500 Hz downward in 100 Hz steps, above 500
static SHOOT: [Step; 10] = [
    tone(1500, 15),
    tone(1400, 15),
    tone(1300, 15),
    tone(1200, 15),
    tone(1100, 15),
    tone(1000, 15),
    tone(900, 15),
    tone(800, 15),
    tone(700, 15),
    tone(600, 15),
];

static EXPLODE: [Step; 6] = [
    tone(100, 50),
    silence(20),
    tone(150, 50),
    silence(20),
    tone(200, 50),
    silence(20),
];

static GAME_OVER: [Step; 5] = [
    tone(800, 150),
    silence(50),
    tone(600, 150),
    silence(50),
    tone(400, 300),
];

// C5, E5, G5, C6
static LEVEL_UP: [Step; 8] = [
    tone(523, 100),
    silence(50),
    tone(659, 100),
    silence(50),
    tone(784, 100),
    silence(50),
    tone(1047, 100),
    silence(50),
];

static ALARM: [Step; 12] = [
    tone(1200, 200),
    silence(100),
    tone(800, 200),
    silence(100),
    tone(1200, 200),
    silence(100),
    tone(800, 200),
    silence(100),
    tone(1200, 200),
    silence(100),
    tone(800, 200),
    silence(100),
];

static NOTIFICATION: [Step; 3] = [tone(1000, 100), silence(50), tone(1200, 100)];

impl SoundEffect {
    /// Every effect, in declaration order
    pub const ALL: [SoundEffect; 12] = [
        SoundEffect::Beep,
        SoundEffect::Select,
        SoundEffect::Back,
        SoundEffect::Error,
        SoundEffect::Coin,
        SoundEffect::Jump,
        SoundEffect::Shoot,
        SoundEffect::Explode,
        SoundEffect::GameOver,
        SoundEffect::LevelUp,
        SoundEffect::Alarm,
        SoundEffect::Notification,
    ];

    /// The tone/silence sequence bound to this effect
    pub fn steps(self) -> &'static [Step] {
        match self {
            SoundEffect::Beep => &BEEP,
            SoundEffect::Select => &SELECT,
            SoundEffect::Back => &BACK,
            SoundEffect::Error => &ERROR,
            SoundEffect::Coin => &COIN,
            SoundEffect::Jump => &JUMP,
            SoundEffect::Shoot => &SHOOT,
            SoundEffect::Explode => &EXPLODE,
            SoundEffect::GameOver => &GAME_OVER,
            SoundEffect::LevelUp => &LEVEL_UP,
            SoundEffect::Alarm => &ALARM,
            SoundEffect::Notification => &NOTIFICATION,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Beep => "beep",
            SoundEffect::Select => "select",
            SoundEffect::Back => "back",
            SoundEffect::Error => "error",
            SoundEffect::Coin => "coin",
            SoundEffect::Jump => "jump",
            SoundEffect::Shoot => "shoot",
            SoundEffect::Explode => "explode",
            SoundEffect::GameOver => "game-over",
            SoundEffect::LevelUp => "level-up",
            SoundEffect::Alarm => "alarm",
            SoundEffect::Notification => "notification",
        }
    }

    /// Look up an effect by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.name() == name)
    }

    /// Total playback time including silences
    pub fn duration_ms(self) -> u32 {
        self.steps().iter().map(Step::duration_ms).sum()
    }
}
