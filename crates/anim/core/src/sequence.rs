//! Declarative effect sequences handed to the rendering collaborator.
//!
//! A [`Sequence`] is an ordered list of visual effects and sound cues. Scripts
//! and the playback composer fill it in with chained setters, then the runtime
//! hands it to the renderer in one `play` call:
//!
//! ```
//! use anim_core::{Point, Sequence, TokenRef};
//!
//! let source = TokenRef::new("tok-1", "Vesk", Point::new(50.0, 50.0));
//! let target = TokenRef::new("tok-2", "Goblin", Point::new(250.0, 50.0));
//!
//! let mut seq = Sequence::new("strikefx");
//! seq.effect()
//!     .file("jb2a.bullet.01.orange")
//!     .at_location(&source)
//!     .stretch_to(&target)
//!     .scale(0.6)
//!     .speed(500.0)
//!     .z_index(10);
//! seq.sound().file("sfx/shot.ogg").volume(0.5).delay(0);
//!
//! assert_eq!(seq.steps().len(), 2);
//! ```

use crate::geometry::Point;

/// Token placed on the scene, as seen by the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenRef {
    pub id: String,
    pub name: String,
    /// Actor the token represents, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub actor_id: Option<String>,
    pub center: Point,
}

impl TokenRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, center: Point) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            actor_id: None,
            center,
        }
    }

    pub fn with_actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    pub fn represents(&self, actor_id: &str) -> bool {
        self.actor_id.as_deref() == Some(actor_id)
    }
}

/// One visual effect in a sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectSpec {
    pub file: Option<String>,
    pub anchor: Option<TokenRef>,
    pub stretch_target: Option<TokenRef>,
    pub scale: f64,
    /// Travel time in ms; `None` means the effect appears instantly.
    pub speed: Option<f64>,
    pub z_index: i32,
    pub opacity: f64,
    pub random_rotation: bool,
    pub missed: bool,
    /// Endpoint displacement for a ranged miss, relative to the target.
    pub miss_offset: Option<Point>,
}

impl Default for EffectSpec {
    fn default() -> Self {
        Self {
            file: None,
            anchor: None,
            stretch_target: None,
            scale: 1.0,
            speed: None,
            z_index: 0,
            opacity: 1.0,
            random_rotation: false,
            missed: false,
            miss_offset: None,
        }
    }
}

impl EffectSpec {
    pub fn file(&mut self, file: impl Into<String>) -> &mut Self {
        self.file = Some(file.into());
        self
    }

    pub fn at_location(&mut self, token: &TokenRef) -> &mut Self {
        self.anchor = Some(token.clone());
        self
    }

    pub fn stretch_to(&mut self, token: &TokenRef) -> &mut Self {
        self.stretch_target = Some(token.clone());
        self
    }

    pub fn scale(&mut self, scale: f64) -> &mut Self {
        self.scale = scale;
        self
    }

    pub fn speed(&mut self, speed: f64) -> &mut Self {
        self.speed = Some(speed);
        self
    }

    pub fn z_index(&mut self, z_index: i32) -> &mut Self {
        self.z_index = z_index;
        self
    }

    pub fn opacity(&mut self, opacity: f64) -> &mut Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn random_rotation(&mut self) -> &mut Self {
        self.random_rotation = true;
        self
    }

    pub fn missed(&mut self) -> &mut Self {
        self.missed = true;
        self
    }

    pub fn miss_offset(&mut self, offset: Point) -> &mut Self {
        self.miss_offset = Some(offset);
        self
    }
}

/// One sound cue in a sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct SoundSpec {
    pub file: Option<String>,
    pub volume: f64,
    pub delay_ms: u64,
}

impl Default for SoundSpec {
    fn default() -> Self {
        Self {
            file: None,
            volume: 0.5,
            delay_ms: 0,
        }
    }
}

impl SoundSpec {
    pub fn file(&mut self, file: impl Into<String>) -> &mut Self {
        self.file = Some(file.into());
        self
    }

    pub fn volume(&mut self, volume: f64) -> &mut Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn delay(&mut self, delay_ms: u64) -> &mut Self {
        self.delay_ms = delay_ms;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SequenceStep {
    Effect(EffectSpec),
    Sound(SoundSpec),
}

/// Ordered effects and sounds to be played together.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    module_id: String,
    steps: Vec<SequenceStep>,
}

impl Sequence {
    pub fn new(module_id: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            steps: Vec::new(),
        }
    }

    /// Appends an effect and returns it for configuration.
    pub fn effect(&mut self) -> &mut EffectSpec {
        self.steps.push(SequenceStep::Effect(EffectSpec::default()));
        match self.steps.last_mut() {
            Some(SequenceStep::Effect(effect)) => effect,
            _ => unreachable!("effect step was just pushed"),
        }
    }

    /// Appends a sound cue and returns it for configuration.
    pub fn sound(&mut self) -> &mut SoundSpec {
        self.steps.push(SequenceStep::Sound(SoundSpec::default()));
        match self.steps.last_mut() {
            Some(SequenceStep::Sound(sound)) => sound,
            _ => unreachable!("sound step was just pushed"),
        }
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn effects(&self) -> impl Iterator<Item = &EffectSpec> {
        self.steps.iter().filter_map(|step| match step {
            SequenceStep::Effect(effect) => Some(effect),
            SequenceStep::Sound(_) => None,
        })
    }

    pub fn sounds(&self) -> impl Iterator<Item = &SoundSpec> {
        self.steps.iter().filter_map(|step| match step {
            SequenceStep::Sound(sound) => Some(sound),
            SequenceStep::Effect(_) => None,
        })
    }
}
